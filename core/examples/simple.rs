//! Runs the README test matrix end to end and prints the refined color
//! matrix.
//!
//! ```text
//! cargo run -p wl-refine --example simple
//! ```

use wl_refine::{refine, Matrix};

fn main() -> Result<(), Box<dyn std::error::Error>> {
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

    let mut matrix = Matrix::from_row_major(8, 4, cells)?;
    let report = refine(&mut matrix)?;

    println!("passes: {}", report.passes);
    println!("d_diag: {}, d: {}", report.d_diag, report.d);
    let n = matrix.n();
    for u in 0..n {
        let row: Vec<String> = (0..n).map(|v| matrix.get(u, v).to_string()).collect();
        println!("{}", row.join(" "));
    }

    Ok(())
}
