use std::path::{Path, PathBuf};

use scormkit_manifest::ManifestConfig;

/// Configuration for the extraction pipeline.
#[derive(Clone, Debug)]
pub struct IngestOptions {
    base_path: PathBuf,
    manifest: ManifestConfig,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self {
            base_path: PathBuf::from("scorm"),
            manifest: ManifestConfig::default(),
        }
    }

    /// Directory prefix under which all extracted trees live. Served media
    /// URLs include this prefix.
    pub fn base_path(mut self, base: impl Into<PathBuf>) -> Self {
        self.base_path = base.into();
        self
    }

    /// File name conventions for the anchor manifest and fallback entry.
    pub fn manifest(mut self, manifest: ManifestConfig) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    pub fn manifest_config(&self) -> &ManifestConfig {
        &self.manifest
    }
}
