//! `validate` subcommand: check a matrix is a valid coherent coloring
//! without refining it.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use wl_refine::validate as validate_matrix;

use crate::format::read_matrix;

/// Read the matrix from `path` (or standard input) and report whether it
/// passes the coherence checks (shape, declared palette, diagonal/
/// off-diagonal disjointness), never refining it.
pub fn validate(path: Option<&Path>) -> Result<()> {
    let matrix = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open: {}", path.display()))?;
            read_matrix(BufReader::new(file))?
        }
        None => read_matrix(io::stdin().lock())?,
    };

    match validate_matrix(&matrix) {
        Ok(()) => {
            println!("ok");
            Ok(())
        }
        Err(reason) => {
            println!("malformed: {reason}");
            std::process::exit(1);
        }
    }
}
