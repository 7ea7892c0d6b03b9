//! Durable storage contract and content fingerprinting for scormkit.
//!
//! # Architecture
//!
//! - `storage.rs` - The `Storage` trait and the local filesystem backend
//! - `walk.rs` - Deterministic traversal helpers (recursive delete, file search)
//! - `fingerprint.rs` - Streaming content hash used as the extraction cache key

pub use error::{Error, Result};
pub use fingerprint::fingerprint;
pub use storage::{LocalStorage, Storage};
pub use walk::{delete_tree, find_file};

mod error;
mod fingerprint;
mod storage;
mod walk;
