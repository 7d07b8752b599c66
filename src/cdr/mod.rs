pub mod mysql;
pub mod source;

pub use mysql::MySqlCdrSource;
pub use source::{QueryMode, RecordingSource, SourceError};
