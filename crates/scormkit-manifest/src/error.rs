#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not find '{0}' in the extracted package")]
    ManifestMissing(String),

    #[error("package declares no launchable resource and has no '{0}' fallback")]
    EntryPointNotFound(String),

    #[error("manifest is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error(transparent)]
    Storage(#[from] scormkit_store::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
