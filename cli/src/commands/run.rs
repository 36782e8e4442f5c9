//! Default command: read a matrix, refine it, write the result.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
#[cfg(feature = "debug-trace")]
use wl_refine::DEFAULT_PALETTE_CEILING;

use crate::format::{read_matrix, write_matrix};

/// Read the matrix from `path` (or standard input if `path` is `None`),
/// refine it, and write the refined matrix to standard output.
pub fn run(path: Option<&Path>) -> Result<()> {
    let matrix = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open: {}", path.display()))?;
            read_matrix(BufReader::new(file))?
        }
        None => read_matrix(io::stdin().lock())?,
    };

    let mut matrix = matrix;
    refine_traced(&mut matrix)?;
    write_matrix(io::stdout().lock(), &matrix)?;
    Ok(())
}

#[cfg(feature = "debug-trace")]
fn refine_traced(matrix: &mut wl_refine::Matrix) -> Result<()> {
    wl_refine::refine_with_trace(matrix, DEFAULT_PALETTE_CEILING, |pass, d_diag, d| {
        println!("# pass {pass}: d={d} d_diag={d_diag}");
    })?;
    Ok(())
}

#[cfg(not(feature = "debug-trace"))]
fn refine_traced(matrix: &mut wl_refine::Matrix) -> Result<()> {
    wl_refine::refine(matrix)?;
    Ok(())
}
