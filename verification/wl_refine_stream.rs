//! # Continuous Invariant Checker
//!
//! Generates an unbounded stream of random coherent matrices, refines each
//! one, and checks the result against the algebraic properties refinement
//! must hold: coherence of the output, refinement of the input, and
//! idempotence. Prints one summary line per batch to standard output and
//! exits non-zero the instant any invariant breaks.

use std::process::ExitCode;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use wl_refine::{refine, validate, Matrix};

/// Build a random coherent (not necessarily cellular) matrix: diagonal and
/// off-diagonal colors live in disjoint ranges, and every declared color is
/// used at least once so the matrix also passes [`validate`].
fn random_coherent_matrix(
    rng: &mut Xoshiro256PlusPlus,
    n: usize,
    d_diag: u32,
    d_off: u32,
) -> Matrix {
    let d = d_diag + d_off;
    let mut cells = vec![0u32; n * n];
    let mut next_diag = 0u32;
    let mut next_off = 0u32;

    for u in 0..n {
        for v in 0..n {
            let color = if u == v {
                let c = if next_diag < d_diag {
                    next_diag += 1;
                    next_diag - 1
                } else {
                    rng.random_range(0..d_diag)
                };
                c
            } else {
                let c = if next_off < d_off {
                    next_off += 1;
                    next_off - 1
                } else {
                    rng.random_range(0..d_off)
                };
                d_diag + c
            };
            cells[u * n + v] = color;
        }
    }

    Matrix::from_row_major(n, d, cells).unwrap_or_else(|err| {
        panic!("generated an ill-shaped matrix: {err:?}");
    })
}

/// Coherence of the output: for every triple of output colors `(i, j, k)`,
/// the count of witnesses `w` with `A'[u,w]=i` and `A'[w,v]=j` is the same
/// for every `(u,v)` with `A'[u,v]=k`.
fn coherence_violation(matrix: &Matrix) -> Option<String> {
    let n = matrix.n();
    let d = matrix.d();
    let witness_count = |u: usize, v: usize, i: u32, j: u32| -> usize {
        (0..n)
            .filter(|&w| matrix.get(u, w) == i && matrix.get(w, v) == j)
            .count()
    };

    for k in 0..d {
        let cells_with_k: Vec<(usize, usize)> = (0..n)
            .flat_map(|u| (0..n).map(move |v| (u, v)))
            .filter(|&(u, v)| matrix.get(u, v) == k)
            .collect();
        if cells_with_k.len() < 2 {
            continue;
        }
        for i in 0..d {
            for j in 0..d {
                let expected = witness_count(cells_with_k[0].0, cells_with_k[0].1, i, j);
                for &(u, v) in &cells_with_k[1..] {
                    if witness_count(u, v, i, j) != expected {
                        return Some(format!(
                            "coherence violated for (i={i}, j={j}, k={k}) at ({u}, {v})"
                        ));
                    }
                }
            }
        }
    }
    None
}

/// Refinement: cells that share an output color must have shared their
/// input color too.
fn refinement_violation(original: &Matrix, refined: &Matrix) -> Option<String> {
    let n = refined.n();
    for u1 in 0..n {
        for v1 in 0..n {
            for u2 in 0..n {
                for v2 in 0..n {
                    if refined.get(u1, v1) == refined.get(u2, v2)
                        && original.get(u1, v1) != original.get(u2, v2)
                    {
                        return Some(format!(
                            "output merged ({u1}, {v1}) and ({u2}, {v2}), which differed in the input"
                        ));
                    }
                }
            }
        }
    }
    None
}

/// Run one trial: generate, refine, check coherence/refinement/idempotence.
/// Returns `Err` with a human-readable description of the first invariant
/// that broke.
fn run_trial(rng: &mut Xoshiro256PlusPlus) -> Result<(), String> {
    let n = rng.random_range(2..10);
    let d_diag = rng.random_range(1..4);
    let d_off = rng.random_range(1..4);
    let original = random_coherent_matrix(rng, n, d_diag, d_off);
    validate(&original).map_err(|reason| format!("generated an invalid matrix: {reason}"))?;

    let mut refined = original.clone();
    refine(&mut refined).map_err(|err| format!("refine failed on valid input: {err}"))?;

    if let Some(msg) = coherence_violation(&refined) {
        return Err(msg);
    }
    if let Some(msg) = refinement_violation(&original, &refined) {
        return Err(msg);
    }

    let mut twice = refined.clone();
    refine(&mut twice).map_err(|err| format!("refining a fixed point failed: {err}"))?;
    if twice.cells() != refined.cells() {
        return Err("refining an already-refined matrix changed it".to_owned());
    }

    Ok(())
}

/// Entry point. The first argument selects the batch size (trials between
/// progress lines); defaults to 256. A non-numeric or missing argument
/// falls back to the default rather than erroring.
fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let batch_size: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(256);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5EED_5EED_C0FF_EE42);
    let mut total: u64 = 0;

    loop {
        for _ in 0..batch_size {
            if let Err(msg) = run_trial(&mut rng) {
                eprintln!("invariant violated after {total} trials: {msg}");
                return ExitCode::FAILURE;
            }
            total += 1;
        }
        println!("{total} trials ok");
    }
}
