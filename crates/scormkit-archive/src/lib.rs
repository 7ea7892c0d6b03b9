//! Zip package reading for scormkit.
//!
//! # Architecture
//!
//! - `reader.rs` - Archive handle: entry listing and per-entry byte access
//! - `locate.rs` - Package root discovery (shallowest anchor manifest)
//! - `sanitize.rs` - Entry path sanitization (zip-slip prevention)

pub use error::{Error, Result};
pub use locate::locate_package_root;
pub use reader::{ArchiveEntry, PackageArchive};
pub use sanitize::sanitize_entry_path;

mod error;
mod locate;
mod reader;
mod sanitize;
