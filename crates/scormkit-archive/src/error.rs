use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("archive is corrupted or not a zip file")]
    Corrupted,

    #[error("entry '{0}' not found in archive")]
    EntryNotFound(String),

    #[error("entry path escapes the extraction root: '{entry}'")]
    UnsafePath { entry: PathBuf },

    #[error("entry path contains invalid components")]
    InvalidPath,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
