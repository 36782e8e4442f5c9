//! Boundary behaviors: trivial matrices, already-cellular inputs.

use wl_refine::{refine, Matrix};

#[test]
fn n_equals_one_is_a_single_diagonal_cell() {
    let mut matrix = Matrix::from_row_major(1, 1, vec![0]).unwrap();
    let report = refine(&mut matrix).unwrap();
    assert_eq!(report.d, 1);
    assert_eq!(matrix.cells(), &[0]);
}

#[test]
fn n_equals_two_with_four_distinct_colors_is_already_cellular() {
    // d_diag = 2 (both diagonal cells distinct), d_off = 2 (both
    // off-diagonal cells distinct): every singleton class is already its
    // own cellular class, so the partition cannot coarsen further.
    let cells = vec![0, 2, 3, 1];
    let mut matrix = Matrix::from_row_major(2, 4, cells.clone()).unwrap();
    refine(&mut matrix).unwrap();

    use std::collections::HashMap;
    let canonical = |values: &[u32]| {
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
            .collect::<Vec<_>>()
    };
    assert_eq!(canonical(matrix.cells()), canonical(&cells));
}

#[test]
fn identity_matrix_is_already_cellular() {
    let n = 5;
    let mut cells = vec![1u32; n * n];
    for i in 0..n {
        cells[i * n + i] = 0;
    }
    let mut matrix = Matrix::from_row_major(n, 2, cells).unwrap();
    let report = refine(&mut matrix).unwrap();
    assert_eq!(report.d, 2);
    for u in 0..n {
        for v in 0..n {
            let expected = if u == v { 0 } else { 1 };
            assert_eq!(matrix.get(u, v), expected);
        }
    }
}
