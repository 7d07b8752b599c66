use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::recording::RecordingReference;

/// Which CDR rows to sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Every row in the table
    All,
    /// Calls since local midnight
    Today,
    /// Calls on or after the given day, up to now
    From(NaiveDate),
}

impl QueryMode {
    /// Lower bound on `calldate`, if the mode has one
    pub fn since(&self) -> Option<NaiveDateTime> {
        match self {
            QueryMode::All => None,
            QueryMode::Today => Some(Local::now().date_naive().and_time(NaiveTime::MIN)),
            QueryMode::From(date) => Some(date.and_time(NaiveTime::MIN)),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to connect to CDR database: {0}")]
    Connect(String),

    #[error("CDR query failed: {0}")]
    Query(String),

    #[error("unexpected CDR row: {0}")]
    Row(String),
}

/// Where recording references come from
///
/// A failure here aborts the run: there is nothing to iterate over.
#[async_trait::async_trait]
pub trait RecordingSource: Send + Sync {
    async fn fetch(&self, mode: QueryMode) -> Result<Vec<RecordingReference>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_mode_starts_at_midnight() {
        let date = NaiveDate::from_ymd_opt(2023, 3, 4).unwrap();
        let since = QueryMode::From(date).since().unwrap();
        assert_eq!(since.to_string(), "2023-03-04 00:00:00");
    }

    #[test]
    fn today_is_from_today() {
        let today = Local::now().date_naive();
        assert_eq!(QueryMode::Today.since(), QueryMode::From(today).since());
        assert_eq!(QueryMode::All.since(), None);
    }
}
