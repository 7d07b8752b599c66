//! Recording references and the pure steps applied to them
//!
//! - `reference`: CDR-derived input items
//! - `path`: office/date -> on-disk location
//! - `sniff`: content type from magic bytes
//! - `key`: object key and public URL

pub mod key;
pub mod path;
pub mod reference;
pub mod sniff;

pub use key::{build_object_key, build_public_url, regional_endpoint};
pub use path::{OfficePathMap, PathResolver, ResolutionError};
pub use reference::{RecordingReference, ResolvedRecording};
pub use sniff::{sniff_content_type, FALLBACK_CONTENT_TYPE, SNIFF_LEN};
