use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::storage::Storage;

/// Recursively delete every file under `root`.
///
/// Backends that cannot represent empty directories will be left with
/// directory husks; that is tolerated. A missing root is a no-op, so the
/// call is safe before a first extraction.
pub fn delete_tree<S: Storage + ?Sized>(storage: &S, root: &Path) -> Result<()> {
    let (subdirs, files) = match storage.list_children(root) {
        Ok(listing) => listing,
        Err(Error::NotFound(_)) => return Ok(()),
        Err(err) => return Err(err),
    };

    for subdir in subdirs {
        delete_tree(storage, &root.join(subdir))?;
    }
    for file in files {
        storage.delete_file(&root.join(file))?;
    }
    Ok(())
}

/// Search for a file named `filename` under `root`, depth first.
///
/// Files of the current directory are checked before any subdirectory is
/// descended into, and both are visited in the backend's stable listing
/// order, so the first match is deterministic even for packages carrying
/// several candidates.
pub fn find_file<S: Storage + ?Sized>(
    storage: &S,
    root: &Path,
    filename: &str,
) -> Result<Option<PathBuf>> {
    let (subdirs, files) = match storage.list_children(root) {
        Ok(listing) => listing,
        Err(Error::NotFound(_)) => return Ok(None),
        Err(err) => return Err(err),
    };

    if files.iter().any(|file| file == filename) {
        return Ok(Some(root.join(filename)));
    }
    for subdir in subdirs {
        if let Some(found) = find_file(storage, &root.join(subdir), filename)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
