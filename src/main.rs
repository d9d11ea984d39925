#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use torus_life::torus::{DEFAULT_DEAD_SYMBOL, DEFAULT_HISTORY_CAPACITY, DEFAULT_LIVE_SYMBOL};
use torus_life::{TorusLife, TorusLifeConfig};

/// Run Conway's Game of Life on a wrap-around board loaded from a text file.
#[derive(Parser)]
#[command(name = "torus-life", version)]
struct Args {
    /// Board description: `width height` on the first line, then one row per
    /// line with `*` for live cells.
    board: PathBuf,

    /// Generations to advance while loading, before the first print.
    #[arg(long, default_value_t = 0)]
    generations: u64,

    /// Generations to advance after the first print.
    #[arg(long, default_value_t = 1)]
    advance: u64,

    /// Generations to roll back after advancing.
    #[arg(long)]
    rollback: Option<u64>,

    /// Symbol printed for live cells.
    #[arg(long, default_value_t = DEFAULT_LIVE_SYMBOL)]
    live: char,

    /// Symbol printed for dead cells.
    #[arg(long, default_value_t = DEFAULT_DEAD_SYMBOL)]
    dead: char,

    /// Number of generations kept for rollback.
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history: usize,

    /// Threads for cell evaluation on large boards.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = TorusLifeConfig::default()
        .live_symbol(args.live)
        .dead_symbol(args.dead)
        .history_capacity(args.history)
        .generations(args.generations);
    if let Some(threads) = args.threads {
        config = config.thread_count(threads);
    }

    let mut board = TorusLife::load(&args.board, config)
        .with_context(|| format!("loading {}", args.board.display()))?;
    info!(
        "loaded {}x{} board, live fraction {:.3}",
        board.width(),
        board.height(),
        board.live_fraction()
    );
    print!("{board}");

    if args.advance > 0 {
        board.next_n_gen(args.advance);
        print!("{board}");
    }

    if let Some(depth) = args.rollback {
        board
            .rollback(depth)
            .with_context(|| format!("rolling back {depth} generations"))?;
        print!("{board}");
    }

    if board.is_still_life() {
        info!("generation {} is a still life", board.generation());
    }
    Ok(())
}
