use std::path::{Path, PathBuf};

use crate::reader::ArchiveEntry;

/// Find the package root: the containing directory of the shallowest entry
/// whose file name equals `anchor`.
///
/// Packages are frequently wrapped in a top-level folder added by the zip
/// tool; the shallowest anchor manifest identifies the true root so that
/// extraction strips the wrapper. Depth is the entry's component count;
/// when two anchors sit at equal depth the first one in listing order wins,
/// which is deterministic because entry order is stable within one archive.
///
/// Returns `None` when no entry matches. The returned root may be empty
/// when the anchor sits at the top of the archive.
pub fn locate_package_root(entries: &[ArchiveEntry], anchor: &str) -> Option<PathBuf> {
    let mut root: Option<PathBuf> = None;
    let mut root_depth = usize::MAX;

    for entry in entries {
        if entry.is_dir {
            continue;
        }
        if entry.path.file_name().is_some_and(|name| name == anchor) {
            let depth = entry.path.components().count();
            if depth < root_depth {
                root_depth = depth;
                root = Some(
                    entry
                        .path
                        .parent()
                        .map(Path::to_path_buf)
                        .unwrap_or_default(),
                );
            }
        }
    }

    root
}
