//! End-to-end golden scenarios: known matrices with known refinements, a
//! cycle-graph product, already-cellular inputs, and the malformed/overflow
//! error paths.

use wl_refine::{refine, refine_with_ceiling, validate, Matrix, RefineError};

/// Relabel `values` by first-occurrence order, in traversal order. Two
/// sequences induce the same partition of positions iff their canonical
/// forms are equal, so this lets scenario tests assert "same partition"
/// without depending on which concrete numbers the implementation picked.
fn canonical(values: &[u32]) -> Vec<u32> {
    use std::collections::HashMap;
    let mut map = HashMap::new();
    let mut next = 0u32;
    values
        .iter()
        .map(|&v| {
            *map.entry(v).or_insert_with(|| {
                let c = next;
                next += 1;
                c
            })
        })
        .collect()
}

#[test]
fn readme_test_matrix_refines_to_eight_colors() {
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
    #[rustfmt::skip]
    let expected = vec![
        1, 2, 3, 2, 2, 3, 5, 3,
        4, 0, 4, 6, 6, 4, 6, 7,
        3, 2, 1, 2, 5, 3, 2, 3,
        4, 6, 4, 0, 6, 7, 6, 4,
        4, 6, 7, 6, 0, 4, 6, 4,
        3, 2, 3, 5, 2, 1, 2, 3,
        7, 6, 4, 6, 6, 4, 0, 4,
        3, 5, 3, 2, 2, 3, 2, 1,
    ];

    let mut matrix = Matrix::from_row_major(8, 4, cells).unwrap();
    let report = refine(&mut matrix).unwrap();
    assert_eq!(report.d, 8);
    assert_eq!(canonical(matrix.cells()), canonical(&expected));
}

/// Cartesian product graph `C_k x C_k` (looped digraph on `k*k` vertices),
/// colored 2 on the diagonal, 1 for an edge, 0 for a non-edge.
fn cycle_square_matrix(k: usize) -> Matrix {
    let n = k * k;
    let idx = |a: usize, b: usize| a * k + b;
    let adjacent = |x: usize, y: usize| (x + 1) % k == y || (y + 1) % k == x;

    let mut cells = vec![0u32; n * n];
    for a1 in 0..k {
        for b1 in 0..k {
            for a2 in 0..k {
                for b2 in 0..k {
                    let i = idx(a1, b1);
                    let j = idx(a2, b2);
                    let color = if i == j {
                        2
                    } else if (a1 == a2 && adjacent(b1, b2)) || (b1 == b2 && adjacent(a1, a2)) {
                        1
                    } else {
                        0
                    };
                    cells[i * n + j] = color;
                }
            }
        }
    }
    Matrix::from_row_major(n, 3, cells).unwrap()
}

#[test]
fn cycle_graph_product_has_five_edge_colors() {
    let mut matrix = cycle_square_matrix(5);
    let report = refine(&mut matrix).unwrap();

    let n = matrix.n();
    let mut off_diagonal_colors = std::collections::HashSet::new();
    for u in 0..n {
        for v in 0..n {
            if u != v {
                off_diagonal_colors.insert(matrix.get(u, v));
            }
        }
    }
    assert_eq!(off_diagonal_colors.len(), 5);
    assert!(report.d_diag <= report.d);
}

#[test]
fn already_cellular_constant_matrix_is_unchanged() {
    let n = 6;
    let mut cells = vec![1u32; n * n];
    for i in 0..n {
        cells[i * n + i] = 0;
    }
    let mut matrix = Matrix::from_row_major(n, 2, cells.clone()).unwrap();
    let report = refine(&mut matrix).unwrap();
    assert_eq!(report.d, 2);
    assert_eq!(canonical(matrix.cells()), canonical(&cells));
}

#[test]
fn malformed_diagonal_off_diagonal_overlap() {
    // Color 0 used on the diagonal (cell (0,0)) and off it (cell (0,1)).
    let cells = vec![0, 0, 1, 0, 1, 2, 2, 2, 1];
    let matrix = Matrix::from_row_major(3, 3, cells).unwrap();
    assert!(validate(&matrix).is_err());

    let mut matrix = matrix;
    let err = refine(&mut matrix).unwrap_err();
    assert!(matches!(err, RefineError::Malformed(_)));
}

#[test]
fn malformed_non_contiguous_palette() {
    // d = 3 declared, but color 1 never appears anywhere.
    let cells = vec![0, 2, 2, 2, 0, 2, 2, 2, 0];
    let mut matrix = Matrix::from_row_major(3, 3, cells).unwrap();
    let err = refine(&mut matrix).unwrap_err();
    assert!(matches!(err, RefineError::Malformed(_)));
}

#[test]
fn overflow_guard_rejects_undersized_ceiling() {
    // A valid, already-cellular n=3 off-diagonal/diagonal split, but run
    // through a ceiling too small to hold even its starting palette: forces
    // the overflow path deterministically without constructing an input
    // that would genuinely need 2^16 colors.
    let cells = vec![0, 1, 1, 1, 0, 1, 1, 1, 0];
    let mut matrix = Matrix::from_row_major(3, 2, cells).unwrap();
    let err = refine_with_ceiling(&mut matrix, 1).unwrap_err();
    assert!(matches!(err, RefineError::Overflow { .. }));
}
