use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use scene_assembly::catalog::TemplateLibrary;
use scene_assembly::scene_graph::Scene;
use scene_assembly::AssemblyConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the placement manifest exported by the authoring tool.
    manifest: PathBuf,
    /// Template catalog file.
    #[arg(long)]
    catalog: PathBuf,
    /// Name of the root object the placements belong to.
    #[arg(long)]
    root: String,
    /// Suffix appended to the root's name to form the container object's name.
    #[arg(long, default_value = "_Decoration")]
    container_suffix: String,
    /// Look templates up by the full entry name, without stripping `.NNN` suffixes.
    #[arg(long)]
    keep_suffix: bool,
}

fn main() -> Result<()> {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();

    let cli = Cli::parse();

    let manifest = fs::read_to_string(&cli.manifest)
        .with_context(|| format!("Failed to read manifest {}", cli.manifest.display()))?;

    let catalog_text = fs::read_to_string(&cli.catalog)
        .with_context(|| format!("Failed to read catalog {}", cli.catalog.display()))?;
    let catalog = TemplateLibrary::from_json(&catalog_text)
        .with_context(|| format!("Failed to parse catalog {}", cli.catalog.display()))?;
    if catalog.is_empty() {
        warn!("Catalog {} has no templates", cli.catalog.display());
    } else {
        info!("Loaded {} templates", catalog.len());
    }

    let config = AssemblyConfig {
        container_suffix: cli.container_suffix,
        strip_disambiguation_suffix: !cli.keep_suffix,
    };

    let mut scene = Scene::new();
    scene.create_object(cli.root.as_str(), None);

    let report = scene_assembly::run(&manifest, &cli.root, &catalog, &mut scene, &config)?;
    scene.late_update();

    print!("{}", report);
    println!();
    print!("{}", scene.hierarchy());

    Ok(())
}
