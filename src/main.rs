use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;

use postman_gen::{
    cli::{Cli, Commands, ExportArgs},
    collection,
    config::AppConfig,
    logging::init_tracing,
    routes::{HandlerDeclaration, extract},
    source::{load_manifest, scan_dir},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::from_env().context("failed to load config")?;
    init_tracing(&cfg.logging.rust_log);

    let (declarations, export) = match cli.command {
        Commands::Manifest(args) => (load_manifest(&args.manifest)?, args.export),
        Commands::Scan(args) => (scan_dir(&args.src_dir)?, args.export),
    };
    run_export(&cfg, &export, &declarations)
}

fn run_export(
    cfg: &AppConfig,
    args: &ExportArgs,
    declarations: &[HandlerDeclaration],
) -> Result<()> {
    let name = args.name.as_deref().unwrap_or(&cfg.export.collection_name);
    let schema = args.schema.as_deref().unwrap_or(&cfg.export.schema_url);

    let descriptors = extract(declarations);
    tracing::info!(
        handlers = declarations.len(),
        routes = descriptors.len(),
        "resolved route declarations"
    );

    let document = collection::build(&descriptors, name, schema);
    let json = document.to_pretty_json()?;
    write_output(&args.out, &json)
}

fn write_output(out: &Path, json: &str) -> Result<()> {
    if out == Path::new("-") {
        println!("{json}");
        return Ok(());
    }
    fs::write(out, json).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!("collection written to {}", out.display());
    Ok(())
}
