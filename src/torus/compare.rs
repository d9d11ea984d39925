//! Approximate comparison of boards by live-cell density.
//!
//! Two densities within [`DENSITY_TOLERANCE`] of each other compare `Equal`.
//! The band is not transitive: with densities 0.000, 0.004 and 0.008 the
//! first two and the last two are equal while the first and last are not.
//! Callers must not treat [`density_cmp`] as a total order for sorting.

use std::cmp::Ordering;

pub const DENSITY_TOLERANCE: f64 = 0.005;

/// Fraction of `cells` that are alive, in `[0, 1]`. An empty slice is `0`.
pub fn live_fraction(cells: &[bool]) -> f64 {
    if cells.is_empty() {
        return 0.0;
    }
    let alive = cells.iter().filter(|&&c| c).count();
    alive as f64 / cells.len() as f64
}

#[inline]
pub fn density_approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < DENSITY_TOLERANCE
}

/// `Equal` inside the tolerance band, otherwise ordered by raw density.
pub fn density_cmp(a: f64, b: f64) -> Ordering {
    if density_approx_eq(a, b) {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}
