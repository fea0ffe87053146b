use mat_core::{DenseMatrix, Matrix, SparseCooMatrix, Triplet};
use mat_lsolver::{Linalg, SolveOptions};
use std::time::Instant;

/// Creates a pentadiagonal sparse matrix A of size n x n.
/// Diagonals:
/// - Main: 4.0
/// - Adjacent (+1, -1): -1.0
/// - Outer (+2, -2): -0.5
fn create_pentadiagonal_matrix(n: usize) -> SparseCooMatrix {
    let mut triplets = Vec::new();

    for i in 0..n {
        // Diagonal -2
        if i >= 2 {
            triplets.push(Triplet::new(i, i - 2, -0.5));
        }
        // Diagonal -1
        if i >= 1 {
            triplets.push(Triplet::new(i, i - 1, -1.0));
        }
        // Main Diagonal
        triplets.push(Triplet::new(i, i, 4.0));
        // Diagonal +1
        if i + 1 < n {
            triplets.push(Triplet::new(i, i + 1, -1.0));
        }
        // Diagonal +2
        if i + 2 < n {
            triplets.push(Triplet::new(i, i + 2, -0.5));
        }
    }

    SparseCooMatrix::from_triplets(n, n, triplets).expect("Failed to create sparse matrix from triplets")
}

/// Creates a column b of size n with b[i] = sin(i / n).
fn create_sin_column(n: usize) -> DenseMatrix {
    let values = (0..n).map(|i| (i as f64 / n as f64).sin()).collect();
    DenseMatrix::new(n, 1, values).expect("Failed to create right-hand side")
}

fn main() {
    // Initialize logging based on RUST_LOG environment variable
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let n = 500;
    log::info!(
        "Setting up {}x{} pentadiagonal matrix A and sin vector b...",
        n,
        n
    );

    let a = create_pentadiagonal_matrix(n);
    let b = create_sin_column(n);
    log::info!("  Nonzeros: {}", a.nnz());
    log::info!("  Norm 1: {:.6}", a.norm(1.0));
    log::info!("  Norm inf: {:.6}", a.norm(f64::INFINITY));

    let options = SolveOptions::new();
    log::info!("Running LU solve...");
    log::info!("  Condition tolerance: {:e}", options.condition_tolerance);

    let start_time = Instant::now();
    let x = options.solve(&a, &b);
    let duration = start_time.elapsed();

    if x.to_vec().iter().any(|v| v.is_nan()) {
        log::error!("Solver found no unique solution");
        return;
    }

    // Residual b - A x
    let ax = a.mprod(&[&x]);
    let residual: Vec<f64> = b
        .data()
        .iter()
        .zip(ax.data())
        .map(|(bi, axi)| bi - axi)
        .collect();
    let residual = DenseMatrix::new(n, 1, residual).expect("Residual has n entries");

    log::info!("Solver finished successfully!");
    log::info!("  Final Residual Norm: {:.6e}", residual.norm(2.0));
    log::info!("  Time elapsed: {:?}", duration);
    log::debug!("Solution vector x (first 10 elements): {:?}", &x.data()[..10.min(n)]);
}
