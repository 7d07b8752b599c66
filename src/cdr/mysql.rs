use chrono::NaiveDateTime;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::info;

use super::source::{QueryMode, RecordingSource, SourceError};
use crate::config::DatabaseConfig;
use crate::recording::RecordingReference;

/// Format the CDR `calldate` is rendered in before path resolution
pub const CALL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Asterisk CDR table (`asteriskcdrdb.cdr`) as a recording source
///
/// Every row is tagged with the office this host serves.
pub struct MySqlCdrSource {
    pool: MySqlPool,
    office: String,
}

impl MySqlCdrSource {
    pub async fn connect(config: &DatabaseConfig, office: String) -> Result<Self, SourceError> {
        info!("Connecting to CDR database");

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| SourceError::Connect(e.to_string()))?;

        Ok(Self { pool, office })
    }

    fn to_reference(&self, row: &MySqlRow) -> Result<RecordingReference, SourceError> {
        let call_date: NaiveDateTime = row
            .try_get("calldate")
            .map_err(|e| SourceError::Row(e.to_string()))?;
        let recording_file: Option<String> = row
            .try_get("recordingfile")
            .map_err(|e| SourceError::Row(e.to_string()))?;

        Ok(RecordingReference::new(
            call_date.format(CALL_DATE_FORMAT).to_string(),
            recording_file.unwrap_or_default(),
            self.office.clone(),
        ))
    }
}

#[async_trait::async_trait]
impl RecordingSource for MySqlCdrSource {
    async fn fetch(&self, mode: QueryMode) -> Result<Vec<RecordingReference>, SourceError> {
        let rows = match mode.since() {
            None => {
                sqlx::query("SELECT calldate, recordingfile FROM cdr ORDER BY calldate")
                    .fetch_all(&self.pool)
                    .await
            }
            Some(since) => {
                sqlx::query(
                    "SELECT calldate, recordingfile FROM cdr
                     WHERE calldate >= ?
                     ORDER BY calldate",
                )
                .bind(since)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| SourceError::Query(e.to_string()))?;

        info!("Fetched {} CDR rows ({:?})", rows.len(), mode);

        rows.iter().map(|row| self.to_reference(row)).collect()
    }
}
