//! Rule table generation for B3/S23.

/// Next state for every `(alive, live_neighbors)` pair, neighbors in `0..=8`.
pub struct RuleTable {
    table: [[bool; 9]; 2],
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTable {
    pub const fn new() -> Self {
        let mut table = [[false; 9]; 2];
        let mut neighbors = 0;
        while neighbors <= 8 {
            table[0][neighbors] = next_state(false, neighbors as u8);
            table[1][neighbors] = next_state(true, neighbors as u8);
            neighbors += 1;
        }
        Self { table }
    }

    #[inline(always)]
    pub fn lookup(&self, alive: bool, live_neighbors: u8) -> bool {
        self.table[alive as usize][live_neighbors as usize]
    }
}

/// Conway's rule: survive on 2 or 3, birth on exactly 3.
pub const fn next_state(alive: bool, live_neighbors: u8) -> bool {
    if alive {
        live_neighbors == 2 || live_neighbors == 3
    } else {
        live_neighbors == 3
    }
}

pub static B3S23: RuleTable = RuleTable::new();
