use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use scormkit_ingest::{IngestOptions, PackageStore};
use scormkit_manifest::ManifestConfig;
use scormkit_store::LocalStorage;

use crate::host;

#[derive(Clone, Debug, Parser)]
#[command(name = "scormkit", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "i", name = "ingest", about = "Extract a package into a storage root")]
    Ingest(IngestArgs),
    #[command(alias = "fp", name = "fingerprint", about = "Print a package's content digest")]
    Fingerprint(FingerprintArgs),
    #[command(name = "info", about = "Show the record and entry point of an ingested package")]
    Info(InfoArgs),
}

#[derive(Clone, Debug, clap::Args)]
pub struct IngestArgs {
    /// Zip archive to ingest
    pub package: PathBuf,
    /// Package identity the tree is filed under
    #[arg(long)]
    pub id: String,
    /// Storage root directory
    #[arg(long, default_value = "media")]
    pub storage: PathBuf,
    /// Directory prefix for extracted trees inside the storage root
    #[arg(long, default_value = "scorm")]
    pub base: String,
    /// Anchor manifest file name
    #[arg(long, default_value = "imsmanifest.xml")]
    pub anchor: String,
}

#[derive(Clone, Debug, clap::Args)]
pub struct FingerprintArgs {
    pub package: PathBuf,
}

#[derive(Clone, Debug, clap::Args)]
pub struct InfoArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long, default_value = "media")]
    pub storage: PathBuf,
    #[arg(long, default_value = "scorm")]
    pub base: String,
}

impl App {
    pub fn run(self) -> Result<()> {
        match self.cmd {
            Commands::Ingest(args) => ingest(args),
            Commands::Fingerprint(args) => fingerprint(args),
            Commands::Info(args) => info(args),
        }
    }
}

fn options(base: &str, anchor: Option<&str>) -> IngestOptions {
    let mut manifest = ManifestConfig::new();
    if let Some(anchor) = anchor {
        manifest = manifest.anchor_filename(anchor);
    }
    IngestOptions::new().base_path(base).manifest(manifest)
}

fn ingest(args: IngestArgs) -> Result<()> {
    let storage = LocalStorage::new(&args.storage);
    let store = PackageStore::new(&storage, options(&args.base, Some(&args.anchor)));

    let name = args
        .package
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.package.display().to_string());
    let mut archive = File::open(&args.package)
        .with_context(|| format!("opening package '{}'", args.package.display()))?;

    let existing = host::load_record(&storage, &store, &args.id)?;
    let record = store
        .ingest(&mut archive, &args.id, &name, existing)
        .with_context(|| format!("ingesting '{name}'"))?;
    host::save_record(&storage, &store, &args.id, &record)?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn fingerprint(args: FingerprintArgs) -> Result<()> {
    let mut file = File::open(&args.package)
        .with_context(|| format!("opening package '{}'", args.package.display()))?;
    let digest = scormkit_store::fingerprint(&mut file)?;
    println!("{digest}");
    Ok(())
}

fn info(args: InfoArgs) -> Result<()> {
    let storage = LocalStorage::new(&args.storage);
    let store = PackageStore::new(&storage, options(&args.base, None));

    let record = host::load_record(&storage, &store, &args.id)?
        .with_context(|| format!("no record for package identity '{}'", args.id))?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    if let Some(url) = store.entry_point_url(&args.id, &record) {
        println!("entry point: {url}");
    }
    Ok(())
}
