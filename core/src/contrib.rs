//! Builds the per-cell structure-constant contribution sequence.
//!
//! For a fixed cell `(u, v)`, enumerates `w` and emits the sequence of
//! packed pairs `(A[u,w], A[w,v])`. This is a pure function of the current
//! matrix and the cell coordinates — it never mutates `A`, and it writes
//! into a caller-supplied buffer so the driver can reuse one `n`-length
//! allocation across every cell of a pass instead of allocating per cell.

use crate::matrix::Matrix;

/// Pack a contribution pair `(c1, c2) in {0,..,d-1}^2` into a single key.
///
/// Uses the bijection `c1 * d + c2`. Callers are responsible for ensuring
/// `d` is small enough that the product fits in `u64`;
/// [`crate::palette::PaletteManager`] enforces this as part of its overflow
/// check before any pass that would produce a larger `d`.
#[must_use]
#[inline]
pub const fn pack(c1: u32, c2: u32, d: u64) -> u64 {
    (c1 as u64) * d + (c2 as u64)
}

/// Fill `out` with the length-`n` contribution sequence for cell `(u, v)`:
/// `out[w] = pack(A[u,w], A[w,v], d)` for `w` in `0..n`.
///
/// `out` is cleared and then extended; reusing a single `Vec` across calls
/// (one per cell within a pass) means refinement performs no per-cell heap
/// allocation beyond the initial reservation.
pub fn build_contributions(matrix: &Matrix, u: usize, v: usize, out: &mut Vec<u64>) {
    let n = matrix.n();
    let d = u64::from(matrix.d());
    out.clear();
    out.extend((0..n).map(|w| pack(matrix.get(u, w), matrix.get(w, v), d)));
}
