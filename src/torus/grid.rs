//! Board geometry: flat/2D index mapping and toroidal neighbor lookup.
//!
//! Cells are stored row-major, so index `i` is `(i / width, i % width)`.
//! Rows and columns wrap independently; a board that is not square still
//! sees its own diagonals.

/// The 8 cardinal and intercardinal directions for neighbor addressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    North = 0, // (row-1, col)
    South = 1, // (row+1, col)
    West  = 2, // (row, col-1)
    East  = 3, // (row, col+1)
    NW    = 4, // (row-1, col-1)
    NE    = 5, // (row-1, col+1)
    SW    = 6, // (row+1, col-1)
    SE    = 7, // (row+1, col+1)
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North, Direction::South,
        Direction::West,  Direction::East,
        Direction::NW,    Direction::NE,
        Direction::SW,    Direction::SE,
    ];

    /// The `(row, col)` offset for this direction.
    #[inline]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West  => (0, -1),
            Direction::East  => (0, 1),
            Direction::NW    => (-1, -1),
            Direction::NE    => (-1, 1),
            Direction::SW    => (1, -1),
            Direction::SE    => (1, 1),
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// `x + 1` on a ring of `n` positions.
#[inline(always)]
pub fn wrap_inc(x: usize, n: usize) -> usize {
    (x + 1) % n
}

/// `x - 1` on a ring of `n` positions, never negative.
#[inline(always)]
pub fn wrap_dec(x: usize, n: usize) -> usize {
    (x + n - 1) % n
}

#[inline(always)]
fn wrap_step(x: usize, delta: i8, n: usize) -> usize {
    match delta {
        -1 => wrap_dec(x, n),
        1 => wrap_inc(x, n),
        _ => x,
    }
}

/// Fixed, dense, rectangular geometry of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Both dimensions must be non-zero; callers validate before building one.
    pub(crate) const fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self { width, height }
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    #[inline(always)]
    pub const fn to_index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline(always)]
    pub const fn from_index(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// Flat indices of the 8 wrap-around neighbors of `index`, in
    /// [`Direction::ALL`] order.
    ///
    /// Boards narrower or shorter than 3 cells alias some neighbors onto the
    /// same cell (or onto the cell itself); see [`Grid::distinct_neighbors`].
    #[inline]
    pub fn neighbor_indices(&self, index: usize) -> [usize; 8] {
        let (row, col) = self.from_index(index);
        let mut out = [0usize; 8];
        for dir in Direction::ALL {
            let (dr, dc) = dir.offset();
            let r = wrap_step(row, dr, self.height);
            let c = wrap_step(col, dc, self.width);
            out[dir.index()] = self.to_index(r, c);
        }
        out
    }

    /// True when some cell's 8 neighbor slots do not name 8 distinct cells.
    #[inline]
    pub const fn aliases_neighbors(&self) -> bool {
        self.width < 3 || self.height < 3
    }

    /// Distinct neighbor cells of `index`, excluding the cell itself.
    ///
    /// Returns the slots and how many leading entries are valid, sorted
    /// ascending. For boards of at least 3x3 all 8 are valid.
    pub fn distinct_neighbors(&self, index: usize) -> ([usize; 8], usize) {
        let mut slots = self.neighbor_indices(index);
        slots.sort_unstable();
        let mut count = 0;
        for i in 0..slots.len() {
            let n = slots[i];
            if n == index || (count > 0 && slots[count - 1] == n) {
                continue;
            }
            slots[count] = n;
            count += 1;
        }
        (slots, count)
    }
}
