use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::{debug, trace};
use rayon::prelude::*;

use super::compare::{density_approx_eq, density_cmp, live_fraction};
use super::grid::Grid;
use super::history::HistoryRing;
use super::rules::B3S23;
use crate::description::BoardDescription;
use crate::error::{LifeError, Result};

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;
pub const DEFAULT_LIVE_SYMBOL: char = '*';
pub const DEFAULT_DEAD_SYMBOL: char = '-';
const DEFAULT_PARALLEL_MIN_CELLS: usize = 16_384;

/// Configuration for a TorusLife board.
///
/// Use `TorusLifeConfig::default()` for the stock symbols and a 100-deep
/// history, or customise individual knobs via the builder methods.
#[derive(Clone, Debug)]
pub struct TorusLifeConfig {
    /// Display symbol for live cells.
    pub live_symbol: char,
    /// Display symbol for dead cells. Must differ from `live_symbol`.
    pub dead_symbol: char,
    /// Number of generations kept for rollback. Must be non-zero.
    pub history_capacity: usize,
    /// Generations to advance as part of construction.
    pub generations: u64,
    /// Threads for a dedicated evaluation pool.
    /// `None` means the global rayon pool.
    pub thread_count: Option<usize>,
    /// Boards with fewer cells than this are advanced on the calling thread.
    pub parallel_min_cells: usize,
}

impl Default for TorusLifeConfig {
    fn default() -> Self {
        Self {
            live_symbol: DEFAULT_LIVE_SYMBOL,
            dead_symbol: DEFAULT_DEAD_SYMBOL,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            generations: 0,
            thread_count: None,
            parallel_min_cells: DEFAULT_PARALLEL_MIN_CELLS,
        }
    }
}

impl TorusLifeConfig {
    pub fn live_symbol(mut self, symbol: char) -> Self {
        self.live_symbol = symbol;
        self
    }

    pub fn dead_symbol(mut self, symbol: char) -> Self {
        self.dead_symbol = symbol;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Advance this many generations right after loading the initial cells.
    pub fn generations(mut self, n: u64) -> Self {
        self.generations = n;
        self
    }

    /// Set an explicit thread count for a dedicated evaluation pool.
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    pub fn parallel_min_cells(mut self, n: usize) -> Self {
        self.parallel_min_cells = n;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.live_symbol == self.dead_symbol {
            return Err(LifeError::Configuration(format!(
                "live and dead cells cannot share the symbol {:?}",
                self.live_symbol
            )));
        }
        if self.history_capacity == 0 {
            return Err(LifeError::Configuration(
                "history capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Conway's Game of Life on a fixed toroidal board with bounded rollback.
#[derive(Clone, Debug)]
pub struct TorusLife {
    grid: Grid,
    cells: Vec<bool>,
    /// Reusable output buffer for the next generation.
    scratch: Vec<bool>,
    generation: u64,
    live_symbol: char,
    dead_symbol: char,
    history: HistoryRing,
    pool: Option<Arc<rayon::ThreadPool>>,
    parallel_min_cells: usize,
}

impl TorusLife {
    /// Build a board with the given `(row, col)` cells alive.
    pub fn new<I>(width: usize, height: usize, live: I, config: TorusLifeConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let grid = checked_grid(width, height)?;
        let mut cells = vec![false; grid.len()];
        for (row, col) in live {
            if !grid.contains(row, col) {
                return Err(LifeError::CellOutOfRange {
                    row,
                    col,
                    width,
                    height,
                });
            }
            cells[grid.to_index(row, col)] = true;
        }
        Self::with_cells(grid, cells, config)
    }

    /// Build a board from a dense row-major cell vector.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<bool>,
        config: TorusLifeConfig,
    ) -> Result<Self> {
        let grid = checked_grid(width, height)?;
        if cells.len() != grid.len() {
            return Err(LifeError::Configuration(format!(
                "{} cells supplied for a {width}x{height} board",
                cells.len()
            )));
        }
        Self::with_cells(grid, cells, config)
    }

    pub fn from_description(desc: &BoardDescription, config: TorusLifeConfig) -> Result<Self> {
        Self::new(desc.width, desc.height, desc.live.iter().copied(), config)
    }

    /// Read a board description file and build a board from it.
    pub fn load(path: impl AsRef<Path>, config: TorusLifeConfig) -> Result<Self> {
        config.validate()?;
        let desc = BoardDescription::from_path(path)?;
        Self::from_description(&desc, config)
    }

    fn with_cells(grid: Grid, cells: Vec<bool>, config: TorusLifeConfig) -> Result<Self> {
        config.validate()?;
        let pool = match config.thread_count {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
                debug!("built evaluation pool with {threads} threads");
                Some(Arc::new(pool))
            }
            None => None,
        };

        let mut board = Self {
            grid,
            scratch: vec![false; cells.len()],
            cells,
            generation: 0,
            live_symbol: config.live_symbol,
            dead_symbol: config.dead_symbol,
            history: HistoryRing::new(config.history_capacity),
            pool,
            parallel_min_cells: config.parallel_min_cells,
        };
        debug!(
            "created {}x{} board, {} live, history capacity {}",
            grid.width(),
            grid.height(),
            board.population(),
            config.history_capacity
        );
        board.next_n_gen(config.generations);
        Ok(board)
    }

    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Row-major cell states.
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn live_symbol(&self) -> char {
        self.live_symbol
    }

    #[inline]
    pub fn dead_symbol(&self) -> char {
        self.dead_symbol
    }

    /// How many of the most recent generations `rollback` can still restore.
    #[inline]
    pub fn rollback_limit(&self) -> usize {
        self.history.rollback_limit()
    }

    #[inline]
    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn for_each_live<F: FnMut(usize, usize)>(&self, mut f: F) {
        for (index, _) in self.cells.iter().enumerate().filter(|(_, alive)| **alive) {
            let (row, col) = self.grid.from_index(index);
            f(row, col);
        }
    }

    pub fn is_alive(&self, index: usize) -> Result<bool> {
        self.cells
            .get(index)
            .copied()
            .ok_or(LifeError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            })
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<bool> {
        let index = self.checked_index(row, col)?;
        Ok(self.cells[index])
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        if self.grid.contains(row, col) {
            Ok(self.grid.to_index(row, col))
        } else {
            Err(LifeError::CellOutOfRange {
                row,
                col,
                width: self.grid.width(),
                height: self.grid.height(),
            })
        }
    }

    pub fn set_live_symbol(&mut self, symbol: char) -> Result<()> {
        if symbol == self.dead_symbol {
            return Err(LifeError::Configuration(format!(
                "live symbol cannot match the dead symbol {symbol:?}"
            )));
        }
        self.live_symbol = symbol;
        Ok(())
    }

    pub fn set_dead_symbol(&mut self, symbol: char) -> Result<()> {
        if symbol == self.live_symbol {
            return Err(LifeError::Configuration(format!(
                "dead symbol cannot match the live symbol {symbol:?}"
            )));
        }
        self.dead_symbol = symbol;
        Ok(())
    }

    /// Flip one cell. Manual edits are not generations and are not recorded.
    pub fn toggle_cell(&mut self, index: usize) -> Result<()> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(LifeError::IndexOutOfRange { index, len })?;
        *cell = !*cell;
        Ok(())
    }

    pub fn toggle_cell_at(&mut self, row: usize, col: usize) -> Result<()> {
        let index = self.checked_index(row, col)?;
        self.toggle_cell(index)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        let index = self.checked_index(row, col)?;
        self.cells[index] = alive;
        Ok(())
    }

    /// Live cells among the distinct wrap-around neighbors of `index`.
    pub fn live_neighbors(&self, index: usize) -> Result<u8> {
        if index >= self.cells.len() {
            return Err(LifeError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            });
        }
        Ok(count_live_neighbors(&self.grid, &self.cells, index))
    }

    /// Write the successor of `self.cells` into `out`.
    fn evaluate_into(&self, out: &mut [bool]) {
        let grid = self.grid;
        let current = self.cells.as_slice();
        if current.len() < self.parallel_min_cells {
            for (index, next) in out.iter_mut().enumerate() {
                *next = next_cell(&grid, current, index);
            }
            return;
        }

        match &self.pool {
            Some(pool) => pool.install(|| evaluate_rows_parallel(&grid, current, out)),
            None => evaluate_rows_parallel(&grid, current, out),
        }
    }

    /// Advance one generation, recording the current state for rollback.
    pub fn next_gen(&mut self) {
        self.history
            .record(self.generation, &self.cells, self.live_symbol, self.dead_symbol);

        let mut next = std::mem::take(&mut self.scratch);
        next.resize(self.cells.len(), false);
        self.evaluate_into(&mut next);
        self.scratch = std::mem::replace(&mut self.cells, next);

        self.generation += 1;
        trace!("advanced to generation {}", self.generation);
    }

    pub fn next_n_gen(&mut self, n: u64) {
        for _ in 0..n {
            self.next_gen();
        }
    }

    /// Copy of this board advanced `n` generations; `self` is untouched.
    pub fn advanced_by(&self, n: u64) -> Self {
        let mut copy = self.clone();
        copy.next_n_gen(n);
        copy
    }

    /// Restore the board as it was `n` generations ago.
    ///
    /// Fails without touching the board when no history is left or `n`
    /// exceeds [`rollback_limit`](Self::rollback_limit). `n == 0` is a no-op
    /// once some history exists.
    pub fn rollback(&mut self, n: u64) -> Result<()> {
        let available = self.history.rollback_limit();
        if available == 0 {
            return Err(LifeError::InsufficientHistory);
        }
        if n > available as u64 {
            return Err(LifeError::OutOfRange {
                requested: n,
                available,
            });
        }
        if n == 0 {
            return Ok(());
        }

        let target = self.generation - n;
        let snapshot = self
            .history
            .get(target)
            .ok_or(LifeError::InsufficientHistory)?;
        self.cells.clone_from(&snapshot.cells);
        self.live_symbol = snapshot.live_symbol;
        self.dead_symbol = snapshot.dead_symbol;
        self.history.release(n as usize);
        self.generation = target;
        debug!(
            "rolled back {n} generations to {target}, {} still recoverable",
            self.history.rollback_limit()
        );
        Ok(())
    }

    /// Advance for positive `n`, roll back `|n|` for negative `n`.
    pub fn step_signed(&mut self, n: i64) -> Result<()> {
        match n.cmp(&0) {
            Ordering::Greater => {
                self.next_n_gen(n as u64);
                Ok(())
            }
            Ordering::Less => self.rollback(n.unsigned_abs()),
            Ordering::Equal => Ok(()),
        }
    }

    /// True when one more generation would leave every cell unchanged.
    pub fn is_still_life(&self) -> bool {
        let mut next = vec![false; self.cells.len()];
        self.evaluate_into(&mut next);
        next == self.cells
    }

    /// A fresh board at generation 0 with every cell flipped.
    ///
    /// Symbols and configuration carry over; the history starts empty.
    pub fn negate(&self) -> Self {
        let cells: Vec<bool> = self.cells.iter().map(|&c| !c).collect();
        Self {
            grid: self.grid,
            scratch: vec![false; cells.len()],
            cells,
            generation: 0,
            live_symbol: self.live_symbol,
            dead_symbol: self.dead_symbol,
            history: HistoryRing::new(self.history.capacity()),
            pool: self.pool.clone(),
            parallel_min_cells: self.parallel_min_cells,
        }
    }

    pub fn live_fraction(&self) -> f64 {
        live_fraction(&self.cells)
    }

    pub fn density_eq(&self, other: &Self) -> bool {
        density_approx_eq(self.live_fraction(), other.live_fraction())
    }

    pub fn density_cmp(&self, other: &Self) -> Ordering {
        density_cmp(self.live_fraction(), other.live_fraction())
    }

    pub fn density_lt(&self, other: &Self) -> bool {
        self.density_cmp(other) == Ordering::Less
    }

    pub fn density_le(&self, other: &Self) -> bool {
        self.density_cmp(other) != Ordering::Greater
    }

    pub fn density_gt(&self, other: &Self) -> bool {
        self.density_cmp(other) == Ordering::Greater
    }

    pub fn density_ge(&self, other: &Self) -> bool {
        self.density_cmp(other) != Ordering::Less
    }

    /// Board rows rendered with the configured symbols.
    pub fn render_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.grid.width()).map(|row| {
            row.iter()
                .map(|&alive| if alive { self.live_symbol } else { self.dead_symbol })
                .collect()
        })
    }
}

impl fmt::Display for TorusLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generation: {}", self.generation)?;
        for row in self.render_rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

fn checked_grid(width: usize, height: usize) -> Result<Grid> {
    if width == 0 || height == 0 {
        return Err(LifeError::Configuration(format!(
            "board dimensions must be positive, got {width}x{height}"
        )));
    }
    if width.checked_mul(height).is_none() {
        return Err(LifeError::Configuration(format!(
            "board of {width}x{height} cells is too large to address"
        )));
    }
    Ok(Grid::new(width, height))
}

#[inline(always)]
fn count_live_neighbors(grid: &Grid, cells: &[bool], index: usize) -> u8 {
    if grid.aliases_neighbors() {
        let (neighbors, count) = grid.distinct_neighbors(index);
        neighbors[..count].iter().filter(|&&n| cells[n]).count() as u8
    } else {
        grid.neighbor_indices(index)
            .into_iter()
            .filter(|&n| cells[n])
            .count() as u8
    }
}

fn evaluate_rows_parallel(grid: &Grid, current: &[bool], out: &mut [bool]) {
    let width = grid.width();
    out.par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| {
            let base = row * width;
            for (col, next) in out_row.iter_mut().enumerate() {
                *next = next_cell(grid, current, base + col);
            }
        });
}

#[inline(always)]
fn next_cell(grid: &Grid, cells: &[bool], index: usize) -> bool {
    B3S23.lookup(cells[index], count_live_neighbors(grid, cells, index))
}
