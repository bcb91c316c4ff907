// Writes img/customer_photos/manifest.json and img/partners/manifest.json for the static site

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vinvel_rust::manifest::{self, ManifestTarget};

/// Generate image manifests for the Vinvel static site.
#[derive(Parser, Debug)]
#[command(name = "generate_manifest")]
#[command(about = "Scan the site's image folders and write manifest.json files", long_about = None)]
struct Args {
    /// Site root containing the `img/` folder.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "vinvel_rust=info".into()))
        .with(fmt::layer())
        .init();

    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("Site root not found: {}", args.root.display()))?;

    for target in ManifestTarget::site_defaults(&root) {
        manifest::generate(&target)?;
    }

    Ok(())
}
