use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::reference::{RecordingReference, ResolvedRecording};

/// Why a reference could not be mapped to a disk path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("unknown office: {0:?}")]
    UnknownOffice(String),

    #[error("office {0:?} has an empty base path")]
    EmptyPrefix(String),

    #[error("call date {0:?} is not in YYYY-MM-DD form")]
    InvalidCallDate(String),
}

/// Office tag -> recording base directory
///
/// Tags are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct OfficePathMap {
    prefixes: HashMap<String, PathBuf>,
}

impl OfficePathMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(office, base path)` pairs, rejecting empty base paths
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, ResolutionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<PathBuf>,
    {
        let mut map = Self::new();
        for (office, prefix) in entries {
            map.insert(office.as_ref(), prefix)?;
        }
        Ok(map)
    }

    pub fn insert(
        &mut self,
        office: &str,
        prefix: impl Into<PathBuf>,
    ) -> Result<(), ResolutionError> {
        let prefix = prefix.into();
        if prefix.as_os_str().is_empty() {
            return Err(ResolutionError::EmptyPrefix(office.to_string()));
        }
        self.prefixes.insert(normalize_office(office), prefix);
        Ok(())
    }

    pub fn get(&self, office: &str) -> Option<&Path> {
        self.prefixes
            .get(&normalize_office(office))
            .map(PathBuf::as_path)
    }

    pub fn contains(&self, office: &str) -> bool {
        self.get(office).is_some()
    }

    pub fn offices(&self) -> impl Iterator<Item = &str> {
        self.prefixes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

fn normalize_office(office: &str) -> String {
    office.trim().to_lowercase()
}

/// Maps recording references onto `<base>/<YYYY>/<MM>/<DD>/<file>`
///
/// Pure path arithmetic; the filesystem is never touched here.
#[derive(Debug, Clone)]
pub struct PathResolver {
    offices: OfficePathMap,
}

impl PathResolver {
    pub fn new(offices: OfficePathMap) -> Self {
        Self { offices }
    }

    pub fn resolve(
        &self,
        reference: &RecordingReference,
    ) -> Result<ResolvedRecording, ResolutionError> {
        let disk_path = self.resolve_path(
            &reference.call_date,
            &reference.recording_file,
            &reference.office,
        )?;

        Ok(ResolvedRecording {
            reference: reference.clone(),
            disk_path,
        })
    }

    pub fn resolve_path(
        &self,
        call_date: &str,
        recording_file: &str,
        office: &str,
    ) -> Result<PathBuf, ResolutionError> {
        let base = self
            .offices
            .get(office)
            .ok_or_else(|| ResolutionError::UnknownOffice(office.to_string()))?;

        let (year, month, day) = split_call_date(call_date)?;

        // A leading '/' would make `join` discard the base path
        Ok(base
            .join(year)
            .join(month)
            .join(day)
            .join(recording_file.trim_start_matches('/')))
    }
}

/// Splits "YYYY-MM-DD[ HH:MM:SS]" into its date components, as written
fn split_call_date(call_date: &str) -> Result<(&str, &str, &str), ResolutionError> {
    let invalid = || ResolutionError::InvalidCallDate(call_date.to_string());

    let date = call_date.trim().split(' ').next().ok_or_else(invalid)?;
    let parts: Vec<&str> = date.split('-').collect();

    match parts.as_slice() {
        [year, month, day]
            if [year, month, day]
                .iter()
                .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit())) =>
        {
            Ok((*year, *month, *day))
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_date_and_ignores_time() {
        assert_eq!(
            split_call_date("2023-03-04 10:00:00").unwrap(),
            ("2023", "03", "04")
        );
        assert_eq!(split_call_date("2023-3-4").unwrap(), ("2023", "3", "4"));
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["", "2023-03", "2023/03/04", "2023-03-04-05", "..-..-..", "2023--04"] {
            assert!(split_call_date(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let err = OfficePathMap::from_entries([("germany", "")]).unwrap_err();
        assert_eq!(err, ResolutionError::EmptyPrefix("germany".to_string()));
    }
}
