use std::io::Read;
use std::path::{Component, Path, PathBuf};

use scormkit_store::{Storage, find_file};

use crate::config::ManifestConfig;
use crate::dialect::ScormDialect;
use crate::error::{Error, Result};

/// What the manifest fixes about an extracted package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestSummary {
    /// Path of the launchable file, relative to the package root, with
    /// forward slashes (the form hrefs use).
    pub entry_point: String,
    pub dialect: ScormDialect,
}

/// Read the anchor manifest of an extracted tree and resolve the entry
/// point and dialect.
///
/// The manifest is expected as a direct child of `tree_root` (extraction
/// strips any wrapper directory), but a recursive search covers trees laid
/// out by earlier versions of the pipeline. Element matching is on local
/// names, so manifests using a default namespace and manifests using
/// prefixes both parse.
pub fn read_manifest<S: Storage + ?Sized>(
    storage: &S,
    tree_root: &Path,
    config: &ManifestConfig,
) -> Result<ManifestSummary> {
    let manifest_path = locate_manifest(storage, tree_root, config.anchor())?;

    let mut reader = storage.open_for_read(&manifest_path)?;
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(scormkit_store::Error::Io)?;
    let text = String::from_utf8_lossy(&bytes);
    let document = roxmltree::Document::parse(&text)?;

    let entry_point = match first_resource_href(&document) {
        Some(href) => href.to_owned(),
        None => fallback_entry_point(storage, tree_root, config.fallback())?,
    };

    let schema_version = document
        .descendants()
        .find(|node| node.is_element() && node.tag_name().name() == "schemaversion")
        .and_then(|node| node.text());
    let dialect = ScormDialect::from_schema_version(schema_version);

    Ok(ManifestSummary {
        entry_point,
        dialect,
    })
}

fn locate_manifest<S: Storage + ?Sized>(
    storage: &S,
    tree_root: &Path,
    anchor: &str,
) -> Result<PathBuf> {
    let direct = tree_root.join(anchor);
    if storage.exists(&direct) {
        return Ok(direct);
    }
    find_file(storage, tree_root, anchor)?
        .ok_or_else(|| Error::ManifestMissing(anchor.to_owned()))
}

/// The first `resource` element carrying an `href`, in document order.
fn first_resource_href<'a>(document: &'a roxmltree::Document) -> Option<&'a str> {
    document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "resource")
        .find_map(|node| node.attribute("href"))
}

fn fallback_entry_point<S: Storage + ?Sized>(
    storage: &S,
    tree_root: &Path,
    fallback: &str,
) -> Result<String> {
    let found = find_file(storage, tree_root, fallback)?
        .ok_or_else(|| Error::EntryPointNotFound(fallback.to_owned()))?;
    let relative = found.strip_prefix(tree_root).unwrap_or(&found);
    Ok(forward_slashes(relative))
}

fn forward_slashes(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
