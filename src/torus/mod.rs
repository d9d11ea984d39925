//! TorusLife engine internals and public API.

mod compare;
mod engine;
pub mod grid;
mod history;
mod rules;

pub use compare::{DENSITY_TOLERANCE, density_cmp, live_fraction};
pub use engine::{
    DEFAULT_DEAD_SYMBOL, DEFAULT_HISTORY_CAPACITY, DEFAULT_LIVE_SYMBOL, TorusLife, TorusLifeConfig,
};
pub use grid::{Direction, Grid};
pub use rules::{B3S23, RuleTable, next_state};
