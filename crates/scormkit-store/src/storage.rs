use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Hierarchical durable storage collaborator.
///
/// The core never assumes a particular backend; any hierarchical blob or
/// file store satisfies this contract. Paths are relative to the backend's
/// own root. Implementations are not required to represent empty
/// directories, which is why [`crate::delete_tree`] only deletes files.
pub trait Storage {
    /// Whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// List the direct children of a directory as `(subdirs, files)`.
    ///
    /// Listing order must be stable across calls on an unchanged tree so
    /// that traversal-dependent results are deterministic.
    fn list_children(&self, path: &Path) -> Result<(Vec<String>, Vec<String>)>;

    /// Write a file in full, creating missing parents.
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Delete a single file.
    fn delete_file(&self, path: &Path) -> Result<()>;

    /// Open a file for streaming read.
    fn open_for_read(&self, path: &Path) -> Result<Box<dyn Read>>;

    /// Resolve a stored path to a location the host can serve from.
    fn resolve_url(&self, path: &Path) -> String;
}

/// Filesystem-backed storage rooted at a directory.
///
/// `list_children` sorts names so traversals over it are deterministic even
/// though the underlying readdir order is not.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Storage for LocalStorage {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn list_children(&self, path: &Path) -> Result<(Vec<String>, Vec<String>)> {
        let full = self.resolve(path);
        let entries = fs::read_dir(&full).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            _ => Error::Io(err),
        })?;

        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() {
                subdirs.push(name);
            } else {
                files.push(name);
            }
        }
        subdirs.sort();
        files.sort();
        Ok((subdirs, files))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, content)?;
        Ok(())
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(self.resolve(path)).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            _ => Error::Io(err),
        })
    }

    fn open_for_read(&self, path: &Path) -> Result<Box<dyn Read>> {
        let file = File::open(self.resolve(path)).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            _ => Error::Io(err),
        })?;
        Ok(Box::new(file))
    }

    fn resolve_url(&self, path: &Path) -> String {
        self.resolve(path).display().to_string()
    }
}
