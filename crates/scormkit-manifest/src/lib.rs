//! Anchor manifest parsing for scormkit.
//!
//! Every package must carry an XML descriptor (`imsmanifest.xml` by
//! convention) at its root. This crate reads it out of an extracted tree to
//! fix two things: which dialect of the runtime vocabulary the package
//! speaks, and which file the host should launch.

pub use config::ManifestConfig;
pub use dialect::ScormDialect;
pub use error::{Error, Result};
pub use parse::{ManifestSummary, read_manifest};

mod config;
mod dialect;
mod error;
mod parse;
