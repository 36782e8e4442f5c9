#![no_main]

use libfuzzer_sys::fuzz_target;
use wl_refine::{refine, validate, Matrix};

// =============================================================================
// PREPARATION
// =============================================================================

/// Interpret the first 4 bytes as a little-endian `n` (folded into a small
/// range so most runs exercise a real fixed-point loop rather than
/// immediately bailing out on `SideTooLarge`), and the remaining bytes as a
/// candidate row-major cell buffer modulo a small declared `d`.
fn decode(data: &[u8]) -> Option<Matrix> {
    if data.len() < 5 {
        return None;
    }
    let n = (u32::from_le_bytes([data[0], data[1], data[2], data[3]]) % 12) as usize;
    let d = u32::from(data[4] % 6) + 1;
    let rest = &data[5..];

    let needed = n * n;
    if rest.len() < needed {
        return None;
    }
    let cells: Vec<u32> = rest[..needed].iter().map(|&b| u32::from(b) % d).collect();
    Matrix::from_row_major(n, d, cells).ok()
}

fuzz_target!(|data: &[u8]| {
    let Some(matrix) = decode(data) else {
        return;
    };

    // =============================================================================
    // 1. VALIDATION IS CONSISTENT WITH REFINE
    // =============================================================================

    let was_valid = validate(&matrix).is_ok();
    let mut working = matrix;
    let result = refine(&mut working);

    assert_eq!(
        result.is_ok(),
        was_valid,
        "refine's acceptance disagreed with validate's"
    );

    let Ok(_) = result else {
        return;
    };

    // =============================================================================
    // 2. OUTPUT RE-VALIDATES AND REFINEMENT IS IDEMPOTENT
    // =============================================================================

    assert!(validate(&working).is_ok(), "refined output failed validation");

    let mut again = working.clone();
    refine(&mut again).expect("refining an already-refined matrix must not fail");
    assert_eq!(
        again.cells(),
        working.cells(),
        "refining a fixed point changed it"
    );
});
