//! Orchestrates the coherent refinement fixed-point loop.
//!
//! Validates the input, then repeatedly builds contributions, encodes and
//! sorts them, assigns new colors, and rewrites the matrix into a scratch
//! buffer until no class splits or the guaranteed termination bound is hit.

use crate::contrib::build_contributions;
use crate::error::{MalformedReason, RefineError};
use crate::matrix::Matrix;
use crate::palette::{PaletteManager, DEFAULT_PALETTE_CEILING};
use crate::signature::canonicalize;

/// Outcome of a successful [`refine`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefineReport {
    /// Number of passes the fixed-point loop actually ran.
    pub passes: u32,
    /// Diagonal palette size `d_diag'` of the refined matrix.
    pub d_diag: u32,
    /// Total palette size `d'` of the refined matrix.
    pub d: u32,
}

/// Validate that `matrix` is a coherent coloring: every cell's color is
/// `< d`, diagonal and off-diagonal color sets are disjoint, and the
/// colors in use form the initial segment `{0, .., d-1}`.
///
/// This is run once, before any refinement work begins, and is also what
/// the `validate` CLI subcommand calls directly.
///
/// # Errors
/// Returns the specific [`MalformedReason`] for the first violation found,
/// in cell-scan order.
pub fn validate(matrix: &Matrix) -> Result<(), MalformedReason> {
    let n = matrix.n();
    let d = matrix.d() as usize;
    let mut diag_used = vec![false; d];
    let mut off_used = vec![false; d];

    for u in 0..n {
        for v in 0..n {
            let color = matrix.get(u, v);
            if color as usize >= d {
                return Err(MalformedReason::ColorOutOfRange {
                    u,
                    v,
                    color,
                    d: matrix.d(),
                });
            }
            if Matrix::is_diagonal(u, v) {
                diag_used[color as usize] = true;
            } else {
                off_used[color as usize] = true;
            }
        }
    }

    for (color, (&on_diag, &off_diag)) in diag_used.iter().zip(off_used.iter()).enumerate() {
        if on_diag && off_diag {
            #[allow(clippy::cast_possible_truncation)]
            return Err(MalformedReason::DiagonalOffDiagonalOverlap {
                color: color as u32,
            });
        }
    }

    for (color, (&on_diag, &off_diag)) in diag_used.iter().zip(off_used.iter()).enumerate() {
        if !on_diag && !off_diag {
            #[allow(clippy::cast_possible_truncation)]
            return Err(MalformedReason::NonContiguousPalette {
                missing: color as u32,
            });
        }
    }

    Ok(())
}

/// Run the coherent refinement fixed-point loop on `matrix`, replacing its
/// contents with the coarsest cellular refinement on success. On failure,
/// `matrix` is left in an unspecified state.
///
/// Uses the default overflow ceiling ([`DEFAULT_PALETTE_CEILING`]); see
/// [`refine_with_ceiling`] to configure a different one.
///
/// # Errors
/// - [`RefineError::Malformed`] if the input fails validation; reported
///   before any refinement work begins.
/// - [`RefineError::OutOfMemory`] if a required allocation fails.
/// - [`RefineError::Overflow`] if a pass would require a palette size at or
///   beyond [`crate::palette::DEFAULT_PALETTE_CEILING`].
/// - [`RefineError::BoundExceeded`] if the loop somehow exceeds its
///   guaranteed bound of `n*n - 1` passes; this indicates a logic error,
///   not a property of valid input.
pub fn refine(matrix: &mut Matrix) -> Result<RefineReport, RefineError> {
    refine_with_ceiling(matrix, DEFAULT_PALETTE_CEILING)
}

/// [`refine`], but with an explicit overflow ceiling instead of
/// [`DEFAULT_PALETTE_CEILING`]. Exposed so a deployment with a smaller
/// representable palette (or a test exercising the overflow path without
/// building a matrix large enough to hit 65535 colors for real) can
/// configure it directly.
///
/// # Errors
/// See [`refine`].
pub fn refine_with_ceiling(matrix: &mut Matrix, ceiling: u32) -> Result<RefineReport, RefineError> {
    refine_with_trace(matrix, ceiling, |_, _, _| {})
}

/// [`refine_with_ceiling`], calling `on_pass(pass_index, d_diag, d)` after
/// every completed pass. The hook costs nothing when passed a no-op closure
/// (monomorphized away) and exists so a caller such as the CLI's
/// `debug-trace` feature can print per-pass progress without the kernel
/// itself depending on any logging crate.
///
/// # Errors
/// See [`refine`].
pub fn refine_with_trace(
    matrix: &mut Matrix,
    ceiling: u32,
    mut on_pass: impl FnMut(u32, u32, u32),
) -> Result<RefineReport, RefineError> {
    validate(matrix)?;

    let n = matrix.n();
    if n == 0 {
        return Ok(RefineReport {
            passes: 0,
            d_diag: 0,
            d: 0,
        });
    }

    // Bulk, start-of-call allocations only: one reusable per-cell
    // contribution buffer, one scratch matrix-sized output buffer.
    let mut contrib_buf: Vec<u64> = Vec::new();
    contrib_buf
        .try_reserve_exact(n)
        .map_err(|_| RefineError::OutOfMemory { requested: n })?;

    let mut scratch: Vec<u32> = Vec::new();
    scratch
        .try_reserve_exact(n * n)
        .map_err(|_| RefineError::OutOfMemory { requested: n * n })?;
    scratch.resize(n * n, 0);

    // Each non-convergent pass strictly increases d, and d <= n*n, so the
    // loop is guaranteed to converge within n*n - 1 passes. For n = 1 that
    // formula is 0, but even a matrix that is already at its fixed point
    // still needs one pass to confirm convergence, so the bound is never
    // allowed to drop below 1.
    let bound = ((n as u64) * (n as u64) - 1).max(1);
    let mut palette = PaletteManager::with_ceiling(ceiling);
    let mut passes: u32 = 0;
    let mut d_diag_final = 0u32;
    let mut d_final = matrix.d();

    loop {
        if u64::from(passes) >= bound {
            return Err(RefineError::BoundExceeded { bound });
        }

        palette.begin_pass();

        for u in 0..n {
            for v in 0..n {
                build_contributions(matrix, u, v, &mut contrib_buf);
                let fingerprint = canonicalize(&mut contrib_buf);
                let local_color =
                    palette.assign(Matrix::is_diagonal(u, v), &contrib_buf, fingerprint);
                scratch[u * n + v] = local_color;
                // `contrib_buf` is only ever read here, never moved: its
                // capacity survives into the next cell's `build_contributions`
                // call, so a pass performs no per-cell allocation beyond the
                // occasional new-signature insert in the palette manager.
            }
        }

        let (d_diag, d) = palette.finalize_pass()?;
        // `scratch` currently holds *local* colors (0-based within their
        // own diagonal/off-diagonal range). Offset off-diagonal entries now
        // that both ranges' sizes are known; which range a cell belongs to
        // is determined by its position, not its value.
        for u in 0..n {
            for v in 0..n {
                let local = scratch[u * n + v];
                scratch[u * n + v] =
                    PaletteManager::offset_for(Matrix::is_diagonal(u, v), local, d_diag);
            }
        }

        passes += 1;
        let converged = d == matrix.d();
        matrix.swap_cells(&mut scratch, d);
        d_diag_final = d_diag;
        d_final = d;
        on_pass(passes, d_diag, d);

        if converged {
            break;
        }
    }

    Ok(RefineReport {
        passes,
        d_diag: d_diag_final,
        d: d_final,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_never_shrinks_between_passes() {
        #[rustfmt::skip]
        let cells = vec![
            3, 1, 2, 1, 1, 2, 2, 2,
            1, 0, 1, 2, 2, 1, 2, 2,
            2, 1, 3, 1, 2, 2, 1, 2,
            1, 2, 1, 0, 2, 2, 2, 1,
            1, 2, 2, 2, 0, 1, 2, 1,
            2, 1, 2, 2, 1, 3, 1, 2,
            2, 2, 1, 2, 2, 1, 0, 1,
            2, 2, 2, 1, 1, 2, 1, 3,
        ];
        let mut matrix = Matrix::from_row_major(8, 4, cells).unwrap();
        let mut seen = vec![matrix.d()];
        refine_with_trace(&mut matrix, DEFAULT_PALETTE_CEILING, |_, _, d| seen.push(d)).unwrap();
        assert!(seen.windows(2).all(|w| w[1] >= w[0]), "palette size shrank: {seen:?}");
    }

    #[test]
    fn trivial_matrix_refines_to_a_single_trivial_pass() {
        let mut matrix = Matrix::from_row_major(1, 1, vec![0]).unwrap();
        let report = refine(&mut matrix).unwrap();
        assert_eq!(report.passes, 1);
        assert_eq!(report.d, 1);
        assert_eq!(matrix.cells(), &[0]);
    }
}
