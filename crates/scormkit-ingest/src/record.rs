use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scormkit_manifest::ScormDialect;

/// Metadata the host persists alongside the runtime for one ingested
/// package.
///
/// A fingerprint appearing here means the corresponding tree is expected to
/// exist at the deterministic path derived from it. That is best effort,
/// not transactional: a reader that finds the tree missing should treat the
/// package as not yet extracted and re-ingest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Hex digest of the archive's full byte content; the sole extraction
    /// cache key.
    pub fingerprint: String,
    /// Display name of the uploaded archive.
    pub source_name: String,
    /// Archive size in bytes.
    pub size: u64,
    /// When this record was last written.
    pub updated_at: DateTime<Utc>,
    /// Launchable file, relative to the extracted tree root. Filled once
    /// the manifest has been parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    /// Detected runtime vocabulary. Filled together with `entry_point`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<ScormDialect>,
}

impl ExtractionRecord {
    pub fn new(
        fingerprint: impl Into<String>,
        source_name: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            source_name: source_name.into(),
            size,
            updated_at: Utc::now(),
            entry_point: None,
            dialect: None,
        }
    }

    /// Whether the manifest has been parsed for this record.
    pub fn is_resolved(&self) -> bool {
        self.entry_point.is_some()
    }
}
