use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::PathBuf;

use tracing::{info, warn};

use scormkit_archive::{PackageArchive, locate_package_root, sanitize_entry_path};
use scormkit_manifest::read_manifest;
use scormkit_store::{Storage, delete_tree, fingerprint};

use crate::error::{Error, Result};
use crate::options::IngestOptions;
use crate::record::ExtractionRecord;
use crate::source::PackageSource;

/// The keyed, idempotent extraction cache.
///
/// Guarantees that the decompressed tree for an archive exists at a path
/// derived from (package identity, content fingerprint), decompressing at
/// most once per fingerprint and reusing prior extractions otherwise. Each
/// file is written in full before the next one starts, so a successful
/// return never exposes partial content. No cross-process lock is taken:
/// two callers racing on a never-seen fingerprint both extract, writing
/// byte-identical files.
pub struct PackageStore<'s, S: Storage + ?Sized> {
    storage: &'s S,
    options: IngestOptions,
}

impl<'s, S: Storage + ?Sized> PackageStore<'s, S> {
    pub fn new(storage: &'s S, options: IngestOptions) -> Self {
        Self { storage, options }
    }

    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    /// Directory holding every tree ever extracted for one package
    /// identity. Exactly one fingerprint's tree lives here at a time.
    pub fn tree_base(&self, identity: &str) -> PathBuf {
        self.options.base().join(identity)
    }

    /// Deterministic home of one fingerprint's extracted tree.
    pub fn tree_path(&self, identity: &str, fingerprint: &str) -> PathBuf {
        self.tree_base(identity).join(fingerprint)
    }

    /// Make sure the archive's tree is materialized, extracting only when
    /// its fingerprint has not been seen for this identity.
    ///
    /// `existing` is the record the host last persisted, if any; on the
    /// fast path it is returned unchanged so nothing is re-parsed. A
    /// record whose tree has gone missing from storage is treated as "not
    /// yet extracted" and triggers a fresh extraction.
    pub fn ensure_extracted<R: Read + Seek>(
        &self,
        archive: &mut R,
        identity: &str,
        source_name: &str,
        existing: Option<ExtractionRecord>,
    ) -> Result<ExtractionRecord> {
        let size = archive.seek(SeekFrom::End(0))?;
        archive.rewind()?;
        let digest = fingerprint(archive)?;
        let target = self.tree_path(identity, &digest);

        if self.storage.exists(&target) {
            return match existing {
                Some(record) if record.fingerprint == digest => Ok(record),
                // Tree present but the record was lost; rebuild metadata only.
                _ => {
                    warn!(
                        identity,
                        fingerprint = %digest,
                        "extracted tree exists without a matching record"
                    );
                    Ok(ExtractionRecord::new(digest, source_name, size))
                }
            };
        }

        if existing
            .as_ref()
            .is_some_and(|record| record.fingerprint == digest)
        {
            info!(
                identity,
                fingerprint = %digest,
                "recorded tree is missing from storage, extracting again"
            );
        }

        let mut package = PackageArchive::open(&mut *archive)?;
        let entries = package.entries()?;
        let anchor = self.options.manifest_config().anchor();
        let root = locate_package_root(&entries, anchor)
            .ok_or_else(|| Error::ManifestNotFound(anchor.to_owned()))?;

        // Evict the prior fingerprint's tree before writing the new one so
        // stale versions do not accumulate under this identity.
        let base = self.tree_base(identity);
        if self.storage.exists(&base) {
            info!(identity, "removing previously extracted tree");
            delete_tree(self.storage, &base)?;
        }

        info!(identity, fingerprint = %digest, source_name, "extracting package");
        let mut written = 0usize;
        for entry in &entries {
            if entry.is_dir || !entry.path.starts_with(&root) {
                continue;
            }
            let Ok(relative) = entry.path.strip_prefix(&root) else {
                continue;
            };
            let relative = sanitize_entry_path(relative)?;
            let content = package.read_entry(&entry.name)?;
            self.storage.write_file(&target.join(relative), &content)?;
            written += 1;
        }
        info!(identity, files = written, "extraction complete");

        Ok(ExtractionRecord::new(digest, source_name, size))
    }

    /// Full ingestion: materialize the tree, then parse the manifest to
    /// fix the entry point and dialect. Records that already carry an
    /// entry point skip the parse entirely.
    pub fn ingest<R: Read + Seek>(
        &self,
        archive: &mut R,
        identity: &str,
        source_name: &str,
        existing: Option<ExtractionRecord>,
    ) -> Result<ExtractionRecord> {
        let mut record = self.ensure_extracted(archive, identity, source_name, existing)?;
        if !record.is_resolved() {
            let tree = self.tree_path(identity, &record.fingerprint);
            let summary = read_manifest(self.storage, &tree, self.options.manifest_config())?;
            record.entry_point = Some(summary.entry_point);
            record.dialect = Some(summary.dialect);
        }
        Ok(record)
    }

    /// Convenience over [`PackageSource`]: fetch the archive bytes under a
    /// host-known reference, then ingest them.
    pub fn fetch_and_ingest<P: PackageSource + ?Sized>(
        &self,
        source: &P,
        reference: &str,
        identity: &str,
        existing: Option<ExtractionRecord>,
    ) -> Result<ExtractionRecord> {
        let bytes = source.fetch(reference)?;
        let mut cursor = Cursor::new(bytes);
        self.ingest(&mut cursor, identity, reference, existing)
    }

    /// Where the host should point the learner's view for a resolved
    /// record, via the storage backend's URL scheme.
    pub fn entry_point_url(&self, identity: &str, record: &ExtractionRecord) -> Option<String> {
        let entry = record.entry_point.as_deref()?;
        let path = self.tree_path(identity, &record.fingerprint).join(entry);
        Some(self.storage.resolve_url(&path))
    }
}
