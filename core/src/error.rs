//! Error taxonomy for the refinement kernel.
//!
//! Three kinds of failure are reported to the caller: malformed input,
//! overflow of the representable palette, and allocation failure. None of
//! them is recoverable inside the kernel; all are reported before
//! (malformed input) or during (overflow, allocation) refinement work.

use thiserror::Error;

/// The reason a matrix failed the validation pass of [`crate::driver::refine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// The flattened cell buffer's length is not `n * n`.
    #[error("cell buffer has length {actual}, expected n*n = {expected} for n = {n}")]
    ShapeMismatch {
        /// Declared side length.
        n: usize,
        /// Expected buffer length (`n * n`).
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
    /// `n` exceeds the supported domain ceiling (`n <= 65535`).
    #[error("n = {n} exceeds the supported ceiling of {limit}")]
    SideTooLarge {
        /// The offending side length.
        n: usize,
        /// The documented ceiling.
        limit: usize,
    },
    /// A cell value is not strictly less than the declared palette size `d`.
    #[error("cell ({u}, {v}) has color {color}, which is not < declared d = {d}")]
    ColorOutOfRange {
        /// Row index of the offending cell.
        u: usize,
        /// Column index of the offending cell.
        v: usize,
        /// The out-of-range color value.
        color: u32,
        /// The declared palette size.
        d: u32,
    },
    /// The set of colors actually used is not the initial segment `{0, .., d-1}`.
    #[error("color {missing} never appears, so the used colors are not a contiguous {{0..d}} segment")]
    NonContiguousPalette {
        /// The first value in `0..d` that is never used.
        missing: u32,
    },
    /// A color value is used both on and off the diagonal.
    #[error("color {color} appears both on the diagonal and off it; coherence requires disjoint ranges")]
    DiagonalOffDiagonalOverlap {
        /// The color that violates the disjointness invariant.
        color: u32,
    },
}

/// Failure of a call to [`crate::driver::refine`].
#[derive(Debug, Error)]
pub enum RefineError {
    /// The input matrix is not a valid coherent coloring.
    #[error("malformed input: {0}")]
    Malformed(#[from] MalformedReason),

    /// The next palette size would exceed the representable index width.
    /// The partially refined matrix is discarded; `A` is left in an
    /// unspecified state.
    #[error(
        "palette overflow: pass would require d' = {required} colors, \
         exceeding the {limit} ceiling"
    )]
    Overflow {
        /// The palette size the next pass would have required.
        required: u64,
        /// The configured ceiling (65535 by default).
        limit: u32,
    },

    /// A required allocation could not be satisfied.
    #[error("out of memory: failed to reserve capacity for {requested} entries")]
    OutOfMemory {
        /// The number of entries the failed allocation was sized for.
        requested: usize,
    },

    /// The fixed-point loop exceeded its guaranteed termination bound of
    /// at most `n^2 - 1` passes. Reaching this means a logic error
    /// elsewhere in the kernel, not a property of valid input.
    #[error("refinement did not converge within the guaranteed bound of {bound} passes")]
    BoundExceeded {
        /// The enforced pass bound (`n*n - 1`).
        bound: u64,
    },
}
