use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_OUTPUT: &str = "postman-collection.json";

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a collection from a JSON declaration manifest
    Manifest(ManifestArgs),
    /// Export a collection by scanning a Rust source tree for route registrations
    Scan(ScanArgs),
}

#[derive(Parser, Clone)]
pub struct ManifestArgs {
    /// Path to the declaration manifest
    pub manifest: PathBuf,
    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Parser, Clone)]
pub struct ScanArgs {
    /// Source directory to scan for route registrations
    pub src_dir: PathBuf,
    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Parser, Clone)]
pub struct ExportArgs {
    /// Collection name (overrides env/default)
    #[arg(long)]
    pub name: Option<String>,
    /// Collection schema URL (overrides env/default)
    #[arg(long)]
    pub schema: Option<String>,
    /// Output file ("-" writes to stdout)
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,
}
