//! # wl-refine
//!
//! Coherent Weisfeiler-Leman refinement of a colored Cartesian square.
//!
//! Given an `n x n` matrix of color indices over `Omega x Omega` (`Omega =
//! {0, .., n-1}`), computes the coarsest *cellular* refinement of that
//! coloring: the unique coarsest partition in which, for every ordered
//! triple of color classes `(i, j, k)`, the number of `w` completing an
//! `i`-`j` path between cells of class `k` is constant across `k`.
//!
//! # Usage
//! ```rust
//! use wl_refine::{refine, Matrix};
//!
//! // The README test matrix (n=8, d=4); see the crate's examples for the
//! // full scenario.
//! let cells = vec![
//!     3, 1, 2, 1, 1, 2, 2, 2,
//!     1, 0, 1, 2, 2, 1, 2, 2,
//!     2, 1, 3, 1, 2, 2, 1, 2,
//!     1, 2, 1, 0, 2, 2, 2, 1,
//!     1, 2, 2, 2, 0, 1, 2, 1,
//!     2, 1, 2, 2, 1, 3, 1, 2,
//!     2, 2, 1, 2, 2, 1, 0, 1,
//!     2, 2, 2, 1, 1, 2, 1, 3,
//! ];
//! let mut matrix = Matrix::from_row_major(8, 4, cells)?;
//! let report = refine(&mut matrix)?;
//! assert_eq!(report.d, 8);
//! # Ok::<(), wl_refine::RefineError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

mod contrib;
mod driver;
mod error;
mod matrix;
mod palette;
mod signature;

// =============================================================================
// EXPORTS
// =============================================================================

pub use contrib::{build_contributions, pack};
pub use driver::{refine, refine_with_ceiling, refine_with_trace, validate, RefineReport};
pub use error::{MalformedReason, RefineError};
pub use matrix::{Matrix, MAX_N};
pub use palette::{PaletteManager, DEFAULT_PALETTE_CEILING};
pub use signature::{canonicalize, fingerprint_of, Signature};
