use mat_rs::prelude::*;
use mat_rs::{DistanceMetric, SolveOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Use a generic error type for the example
type ExampleError = Box<dyn std::error::Error>;

fn main() -> Result<(), ExampleError> {
    // Initialize logging based on RUST_LOG environment variable
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting native matrix example...");

    // --- 1. Define Sample Data ---
    // Example: A = [[2, -1], [-1, 2]], B = [[1, 1]], C = [[1], [1]], f = [1, 1]
    // Expected: x = A^-1 * f = [1, 1]^T
    //           g = B * x = [1*1 + 1*1] = [2]
    //           h = C * g = [[1*2], [1*2]] = [2, 2]^T
    let a = sparse_coo(2, 2, &[2.0, -1.0, -1.0, 2.0]);
    let b = m(1, 2, &[1.0, 1.0]);
    let c = m2(&[vec![1.0], vec![1.0]]);
    let f = m(2, 1, &[1.0, 1.0]);

    log::info!("Sample data defined.");
    log::info!("A = {:?}", a);
    log::info!("f = {:?}", f.to_vec());

    // --- 2. Solve and chain products ---
    let x = SolveOptions::new().try_ldivide(&a, &f)?;
    let h = c.mprod(&[&b, &x]);
    log::info!("x = {:?}", x.to_vec());
    log::info!("h = C * B * x = {:?}", h.to_vec());

    let a_inv = a.inverse()?;
    log::info!("A^-1 = {:?}", a_inv.to_vec());
    log::info!("|A|_1 = {}, |A|_2 = {:.6}", a.norm(1.0), a.norm(2.0));

    // --- 3. Random sparse points and their distances ---
    let mut rng = StdRng::seed_from_u64(42);
    let points = sparse_randn(5, 3, 0.4, &mut rng);
    log::info!("{} of {} cells populated", points.nnz(), 5 * 3);
    let distances = points.dist(DistanceMetric::Euclidean);
    for i in 0..distances.rows() {
        log::info!("  {:?}", distances.row(i));
    }

    log::info!("Done.");
    Ok(())
}
