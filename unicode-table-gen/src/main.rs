use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use unicode_table_gen::{case_folding::MappingTable, header::HeaderConfig, logger};

/// Generate the C++ Unicode case tables from CaseFolding.txt
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to CaseFolding.txt
    input: PathBuf,
    /// Header to write, replaced if it exists
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(LevelFilter::Info)?;

    let table = MappingTable::from_path(&args.input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    HeaderConfig::default()
        .write(&table, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}
