use std::io;

/// Ingestion failure taxonomy.
///
/// The first three are fatal to the current upload and leave no partial
/// state behind; `SourceUnavailable` is recoverable by retry or re-upload
/// and never touches a previously extracted tree.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("archive is corrupted or not a zip file")]
    CorruptArchive,

    #[error("could not find '{0}' anywhere in the package")]
    ManifestNotFound(String),

    #[error("package declares no launchable resource and has no '{0}' fallback")]
    EntryPointNotFound(String),

    #[error("package source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("manifest is not well-formed XML: {0}")]
    InvalidManifest(String),

    #[error(transparent)]
    Storage(#[from] scormkit_store::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Canonical "could not fetch" failure for `PackageSource`
    /// implementations.
    pub fn source_unavailable(reference: &str, detail: impl std::fmt::Display) -> Self {
        Error::SourceUnavailable(format!("'{reference}': {detail}"))
    }
}

impl From<scormkit_archive::Error> for Error {
    fn from(err: scormkit_archive::Error) -> Self {
        match err {
            scormkit_archive::Error::Io(io_err) => Error::Io(io_err),
            _ => Error::CorruptArchive,
        }
    }
}

impl From<scormkit_manifest::Error> for Error {
    fn from(err: scormkit_manifest::Error) -> Self {
        match err {
            scormkit_manifest::Error::ManifestMissing(name) => Error::ManifestNotFound(name),
            scormkit_manifest::Error::EntryPointNotFound(name) => Error::EntryPointNotFound(name),
            scormkit_manifest::Error::Xml(xml) => Error::InvalidManifest(xml.to_string()),
            scormkit_manifest::Error::Storage(storage) => Error::Storage(storage),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
