#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use rand::RngCore;
use rand::SeedableRng;
use std::time::Instant;
use torus_life::{TorusLife, TorusLifeConfig};

const LIVE_DENSITY: f64 = 0.42;

// A full-depth history would hold 100 copies of a 2048x2048 board.
fn bench_config() -> TorusLifeConfig {
    TorusLifeConfig::default().history_capacity(1)
}

fn bench_torus(size: usize, iterations: u64, config: TorusLifeConfig) -> (f64, usize) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED_1234_ABCD_EF01);
    let threshold = (u64::MAX as f64 * LIVE_DENSITY) as u64;
    let cells: Vec<bool> = (0..size * size)
        .map(|_| rng.next_u64() <= threshold)
        .collect();

    let mut board = match TorusLife::from_cells(size, size, cells, config) {
        Ok(board) => board,
        Err(err) => panic!("failed to build {size}x{size} board: {err}"),
    };

    let start = Instant::now();
    board.next_n_gen(iterations);
    let duration = start.elapsed();

    (duration.as_secs_f64() * 1000.0, board.population())
}

fn main() {
    let scales: &[(usize, u64)] = &[
        (64, 500),   // serial path
        (128, 200),  // at the parallel threshold
        (512, 100),
        (1024, 50),
        (2048, 20),
    ];

    println!(
        "{:<10} {:>10} {:>8} {:>12} {:>10} {:>12}",
        "Grid", "Mode", "Iters", "Total(ms)", "Avg(ms)", "Population"
    );
    println!("{}", "-".repeat(68));

    for &(size, iters) in scales {
        for (mode, config) in [
            ("serial", bench_config().parallel_min_cells(usize::MAX)),
            ("parallel", bench_config().parallel_min_cells(0)),
        ] {
            let (total_ms, pop) = bench_torus(size, iters, config);
            let avg_ms = total_ms / iters as f64;
            println!(
                "{:<10} {:>10} {:>8} {:>12.1} {:>10.4} {:>12}",
                format!("{}x{}", size, size),
                mode,
                iters,
                total_ms,
                avg_ms,
                pop
            );
        }
    }
}
