//! Conway's Game of Life (B3/S23) on a fixed toroidal board with bounded
//! rollback history.

pub mod description;
pub mod error;
pub mod torus;

pub use description::BoardDescription;
pub use error::{LifeError, Result};
pub use torus::{TorusLife, TorusLifeConfig};
