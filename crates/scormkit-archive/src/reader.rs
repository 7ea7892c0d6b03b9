use std::io::{Read, Seek};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// One entry of an opened package archive.
///
/// `name` is the raw zip entry name used for lookups; `path` is the
/// interpreted, safe relative path used for depth and prefix reasoning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
}

/// An opened zip package.
///
/// Wraps a single `ZipArchive` so that arbitrarily many entries can be read
/// without reopening or re-decompressing the whole archive.
pub struct PackageArchive<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
}

impl<R: Read + Seek> PackageArchive<R> {
    /// Open a package from any seekable byte source.
    ///
    /// A malformed central directory or truncated stream fails with
    /// [`Error::Corrupted`]; nothing partially succeeds.
    pub fn open(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader).map_err(|_| Error::Corrupted)?;
        Ok(Self { archive })
    }

    /// List all entries in stable archive order.
    ///
    /// Entries whose names cannot be interpreted as a safe relative path
    /// (absolute paths, `..` escapes) are rejected up front.
    pub fn entries(&mut self) -> Result<Vec<ArchiveEntry>> {
        let mut entries = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let file = self.archive.by_index(index).map_err(|_| Error::Corrupted)?;
            let path = file.enclosed_name().ok_or(Error::InvalidPath)?;
            entries.push(ArchiveEntry {
                name: file.name().to_owned(),
                path,
                is_dir: file.is_dir(),
                size: file.size(),
            });
        }
        Ok(entries)
    }

    /// Read the full content of one entry by its raw name.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(name)
            .map_err(|err| match err {
                zip::result::ZipError::FileNotFound => Error::EntryNotFound(name.to_owned()),
                _ => Error::Corrupted,
            })?;
        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content).map_err(|_| Error::Corrupted)?;
        Ok(content)
    }
}
