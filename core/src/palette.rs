//! Translates cell signatures into new color indices.
//!
//! Translates cell signatures into new color indices for the next pass,
//! keeping diagonal and off-diagonal colors in disjoint ranges and
//! detecting overflow of the representable palette size.

use ahash::AHashMap;

use crate::error::RefineError;
use crate::signature::Signature;

/// Overflow ceiling: refuse a pass that would need `d' >= 2^16` colors.
pub const DEFAULT_PALETTE_CEILING: u32 = 65_535;

/// One signature-to-color map, scoped to either the diagonal or the
/// off-diagonal cells of a single pass.
///
/// Signatures are bucketed by [`Signature::fingerprint`]; a bucket holding
/// more than one entry means a hash collision, resolved by a full equality
/// check against the bucket's other entries.
#[derive(Debug, Default)]
struct SignatureMap {
    buckets: AHashMap<u64, Vec<(Signature, u32)>>,
    next_color: u32,
}

impl SignatureMap {
    /// `sorted_keys` must already be sorted ascending (the driver sorts the
    /// reused contribution buffer via [`crate::signature::canonicalize`]
    /// before calling this). Only a bucket miss allocates, by cloning
    /// `sorted_keys` into a freshly owned [`Signature`].
    fn assign(&mut self, sorted_keys: &[u64], fingerprint: u64) -> u32 {
        let bucket = self.buckets.entry(fingerprint).or_default();
        for (existing, color) in bucket.iter() {
            if existing.sorted_keys() == sorted_keys {
                return *color;
            }
        }
        let color = self.next_color;
        self.next_color += 1;
        bucket.push((Signature::from_sorted(sorted_keys.to_vec()), color));
        color
    }

    const fn color_count(&self) -> u32 {
        self.next_color
    }
}

/// Owns the per-pass signature tables. Built fresh with [`Self::begin_pass`]
/// and destroyed (conceptually — the old maps are simply dropped) when the
/// next pass begins or the call returns; their lifetime never outlives a
/// single pass.
#[derive(Debug)]
pub struct PaletteManager {
    diagonal: SignatureMap,
    off_diagonal: SignatureMap,
    ceiling: u32,
}

impl PaletteManager {
    /// Construct a manager using the default overflow ceiling
    /// ([`DEFAULT_PALETTE_CEILING`]).
    #[must_use]
    pub fn new() -> Self {
        Self::with_ceiling(DEFAULT_PALETTE_CEILING)
    }

    /// Construct a manager with an explicit overflow ceiling. Exposed so
    /// tests can exercise the overflow path without building a matrix large
    /// enough to hit 65535 colors for real.
    #[must_use]
    pub fn with_ceiling(ceiling: u32) -> Self {
        Self {
            diagonal: SignatureMap::default(),
            off_diagonal: SignatureMap::default(),
            ceiling,
        }
    }

    /// Clear both signature maps, starting a fresh pass. Idempotent: safe
    /// to call before the very first pass too.
    pub fn begin_pass(&mut self) {
        self.diagonal = SignatureMap::default();
        self.off_diagonal = SignatureMap::default();
    }

    /// Assign a color to the signature described by `sorted_keys` (already
    /// sorted ascending) and its `fingerprint`, within the range appropriate
    /// for `is_diagonal`, creating a fresh index if this signature has not
    /// been seen yet this pass. The returned value is a *local* index
    /// (0-based within its own range); [`Self::finalize_pass`] offsets
    /// off-diagonal colors once both ranges' sizes are known.
    pub fn assign(&mut self, is_diagonal: bool, sorted_keys: &[u64], fingerprint: u64) -> u32 {
        if is_diagonal {
            self.diagonal.assign(sorted_keys, fingerprint)
        } else {
            self.off_diagonal.assign(sorted_keys, fingerprint)
        }
    }

    /// Concatenate the two ranges: diagonal colors keep `{0, .., d_diag-1}`,
    /// off-diagonal colors are offset to `{d_diag, .., d-1}`. Returns
    /// `(d_diag, d)` for the pass just finished, translating local
    /// off-diagonal indices is the driver's job via [`Self::offset_for`].
    ///
    /// # Errors
    /// Returns [`RefineError::Overflow`] if the combined palette size would
    /// meet or exceed the configured ceiling.
    pub fn finalize_pass(&self) -> Result<(u32, u32), RefineError> {
        let d_diag = self.diagonal.color_count();
        let d_off = self.off_diagonal.color_count();
        let total = u64::from(d_diag) + u64::from(d_off);
        if total >= u64::from(self.ceiling) {
            return Err(RefineError::Overflow {
                required: total,
                limit: self.ceiling,
            });
        }
        // `total < ceiling <= u32::MAX` guarantees this downcast is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let d = total as u32;
        Ok((d_diag, d))
    }

    /// Translate a local color into its final, offset color: diagonal
    /// colors pass through unchanged, off-diagonal colors are shifted past
    /// `d_diag`.
    #[must_use]
    pub const fn offset_for(is_diagonal: bool, local_color: u32, d_diag: u32) -> u32 {
        if is_diagonal {
            local_color
        } else {
            d_diag + local_color
        }
    }
}

impl Default for PaletteManager {
    fn default() -> Self {
        Self::new()
    }
}
