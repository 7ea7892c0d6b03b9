/// File name conventions used when resolving a package.
#[derive(Clone, Debug)]
pub struct ManifestConfig {
    anchor_filename: String,
    fallback_entry: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestConfig {
    pub fn new() -> Self {
        Self {
            anchor_filename: "imsmanifest.xml".to_owned(),
            fallback_entry: "index.html".to_owned(),
        }
    }

    /// Name of the anchor manifest file every package must contain.
    pub fn anchor_filename(mut self, name: impl Into<String>) -> Self {
        self.anchor_filename = name.into();
        self
    }

    /// File name searched for when the manifest names no launchable resource.
    pub fn fallback_entry(mut self, name: impl Into<String>) -> Self {
        self.fallback_entry = name.into();
        self
    }

    pub fn anchor(&self) -> &str {
        &self.anchor_filename
    }

    pub fn fallback(&self) -> &str {
        &self.fallback_entry
    }
}
