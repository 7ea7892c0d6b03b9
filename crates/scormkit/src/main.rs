use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod host;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = app::App::parse();
    app.run()
}
