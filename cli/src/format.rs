//! Textual matrix format: a leading `d`, a leading `n`, then `n*n`
//! whitespace-separated non-negative decimal tokens, each strictly less
//! than `d`, read in row-major order.

use std::io::{Read, Write};

use anyhow::{bail, Context, Result};
use wl_refine::Matrix;

/// Parse the textual matrix format from an arbitrary reader.
///
/// Whitespace between tokens is any non-empty run of spaces, tabs, or
/// newlines, so `d` and `n` may share a line with the first row or each sit
/// on their own; [`str::split_whitespace`] treats both the same way.
pub fn read_matrix<R: Read>(mut reader: R) -> Result<Matrix> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("failed to read matrix input")?;

    let mut tokens = text.split_whitespace();

    let d: u32 = tokens
        .next()
        .context("missing palette size d")?
        .parse()
        .context("palette size d is not a non-negative integer")?;
    let n: usize = tokens
        .next()
        .context("missing side length n")?
        .parse()
        .context("side length n is not a non-negative integer")?;

    let mut cells = Vec::with_capacity(n.saturating_mul(n));
    for (index, token) in tokens.by_ref().enumerate() {
        if index >= n * n {
            break;
        }
        let value: u32 = token
            .parse()
            .with_context(|| format!("cell {index} is not a non-negative integer: {token:?}"))?;
        cells.push(value);
    }

    if cells.len() != n * n {
        bail!(
            "expected {} matrix cells (n = {n}), found {}",
            n * n,
            cells.len()
        );
    }

    Ok(Matrix::from_row_major(n, d, cells)?)
}

/// Write the textual matrix format: `d`, then `n`, then `n` rows of
/// space-separated cell values.
pub fn write_matrix<W: Write>(mut writer: W, matrix: &Matrix) -> Result<()> {
    let n = matrix.n();
    writeln!(writer, "{}", matrix.d())?;
    writeln!(writer, "{n}")?;
    for u in 0..n {
        let row: Vec<String> = (0..n).map(|v| matrix.get(u, v).to_string()).collect();
        writeln!(writer, "{}", row.join(" "))?;
    }
    Ok(())
}
