//! The slice of host behavior the CLI stands in for: persisting the
//! extraction record between invocations.

use std::io::Read;

use anyhow::{Context, Result};

use scormkit_ingest::{ExtractionRecord, PackageStore};
use scormkit_store::{LocalStorage, Storage};

const RECORD_FILE: &str = "record.json";

pub fn load_record(
    storage: &LocalStorage,
    store: &PackageStore<'_, LocalStorage>,
    identity: &str,
) -> Result<Option<ExtractionRecord>> {
    let path = store.tree_base(identity).join(RECORD_FILE);
    let mut reader = match storage.open_for_read(&path) {
        Ok(reader) => reader,
        Err(scormkit_store::Error::NotFound(_)) => return Ok(None),
        Err(err) => return Err(err).context("opening extraction record"),
    };

    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("reading extraction record")?;
    let record = serde_json::from_slice(&bytes).context("parsing extraction record")?;
    Ok(Some(record))
}

pub fn save_record(
    storage: &LocalStorage,
    store: &PackageStore<'_, LocalStorage>,
    identity: &str,
    record: &ExtractionRecord,
) -> Result<()> {
    let path = store.tree_base(identity).join(RECORD_FILE);
    let bytes = serde_json::to_vec_pretty(record)?;
    storage
        .write_file(&path, &bytes)
        .context("writing extraction record")?;
    Ok(())
}
