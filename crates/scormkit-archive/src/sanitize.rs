use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Sanitize a relative entry path before it is joined under an extraction
/// target.
///
/// Rejects absolute paths and drive prefixes outright, resolves `.` away,
/// and refuses any `..` that would climb above the extraction root.
pub fn sanitize_entry_path(entry_path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();

    for component in entry_path.components() {
        match component {
            Component::Normal(part) => result.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    return Err(Error::UnsafePath {
                        entry: entry_path.to_path_buf(),
                    });
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::UnsafePath {
                    entry: entry_path.to_path_buf(),
                });
            }
        }
    }

    if result.as_os_str().is_empty() {
        return Err(Error::InvalidPath);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_relative_path_passes() {
        let result = sanitize_entry_path(Path::new("res/img/logo.png")).unwrap();
        assert_eq!(result, PathBuf::from("res/img/logo.png"));
    }

    #[test]
    fn current_dir_components_removed() {
        let result = sanitize_entry_path(Path::new("./a/./b.txt")).unwrap();
        assert_eq!(result, PathBuf::from("a/b.txt"));
    }

    #[test]
    fn contained_parent_dir_resolved() {
        let result = sanitize_entry_path(Path::new("a/b/../c.txt")).unwrap();
        assert_eq!(result, PathBuf::from("a/c.txt"));
    }

    #[test]
    fn escaping_parent_dir_rejected() {
        let result = sanitize_entry_path(Path::new("../evil.sh"));
        assert!(matches!(result, Err(Error::UnsafePath { .. })));
    }

    #[test]
    fn absolute_path_rejected() {
        let malicious = if cfg!(windows) { "C:\\evil.sh" } else { "/evil.sh" };
        let result = sanitize_entry_path(Path::new(malicious));
        assert!(matches!(result, Err(Error::UnsafePath { .. })));
    }

    #[test]
    fn empty_result_rejected() {
        let result = sanitize_entry_path(Path::new("."));
        assert!(matches!(result, Err(Error::InvalidPath)));
    }
}
