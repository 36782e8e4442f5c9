//! wl-refine CLI
//!
//! Reads the textual matrix format from standard input or a file, runs
//! coherent refinement, and writes the result back out.

mod commands;
mod format;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{run, validate};

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "wl-refine")]
#[command(about = "Coherent Weisfeiler-Leman refinement of a colored Cartesian square", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Matrix file to read (standard input if omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a matrix is a valid coherent coloring, without refining it
    Validate {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Validate { file }) => validate(file.as_deref())?,
        None => run(cli.file.as_deref())?,
    }

    Ok(())
}
