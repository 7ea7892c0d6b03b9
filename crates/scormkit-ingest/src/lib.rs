//! Content-addressed, idempotent package extraction for scormkit.
//!
//! # Architecture
//!
//! - `record.rs` - `ExtractionRecord`, the metadata the host persists
//! - `pipeline.rs` - `PackageStore`: fingerprint, fast path, evict, extract
//! - `source.rs` - The archive source collaborator contract
//! - `error.rs` - Ingestion failure taxonomy
//!
//! The extracted tree for a fingerprint is append-once: its path is a pure
//! function of content, so concurrent extraction of the same fingerprint
//! only costs redundant work, never corruption.

pub use error::{Error, Result};
pub use options::IngestOptions;
pub use pipeline::PackageStore;
pub use record::ExtractionRecord;
pub use source::PackageSource;

mod error;
mod options;
mod pipeline;
mod record;
mod source;
