//! Fixed-capacity ring of past board states for bounded rollback.
//!
//! Generation `g` is stored at slot `g % capacity`. `rollback_limit` counts
//! how many of the most recent generations can still be restored; it grows by
//! one per recorded generation (saturating at capacity) and shrinks by the
//! depth of each rollback. Rewinding never clears slots, so a later replay
//! simply overwrites them again.

/// Deep copy of everything a rollback restores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub cells: Vec<bool>,
    pub live_symbol: char,
    pub dead_symbol: char,
}

impl Snapshot {
    /// Overwrite in place, reusing the existing cell buffer.
    fn refill(&mut self, cells: &[bool], live_symbol: char, dead_symbol: char) {
        self.cells.clear();
        self.cells.extend_from_slice(cells);
        self.live_symbol = live_symbol;
        self.dead_symbol = dead_symbol;
    }
}

#[derive(Clone, Debug)]
pub struct HistoryRing {
    slots: Vec<Option<Snapshot>>,
    rollback_limit: usize,
}

impl HistoryRing {
    /// `capacity` must be non-zero; the engine config rejects 0.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: vec![None; capacity],
            rollback_limit: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn rollback_limit(&self) -> usize {
        self.rollback_limit
    }

    #[inline]
    fn slot_of(&self, generation: u64) -> usize {
        (generation % self.slots.len() as u64) as usize
    }

    /// Save the state of `generation` just before it is advanced.
    pub fn record(
        &mut self,
        generation: u64,
        cells: &[bool],
        live_symbol: char,
        dead_symbol: char,
    ) {
        let slot = self.slot_of(generation);
        if let Some(existing) = &mut self.slots[slot] {
            existing.refill(cells, live_symbol, dead_symbol);
        } else {
            self.slots[slot] = Some(Snapshot {
                cells: cells.to_vec(),
                live_symbol,
                dead_symbol,
            });
        }
        self.rollback_limit = (self.rollback_limit + 1).min(self.capacity());
    }

    /// Snapshot of `generation`, if that slot has ever been written.
    ///
    /// Only meaningful for generations within `rollback_limit` of the current
    /// one; older slots may hold a newer generation that shares the residue.
    pub fn get(&self, generation: u64) -> Option<&Snapshot> {
        self.slots[self.slot_of(generation)].as_ref()
    }

    /// Consume `depth` recoverable generations. Callers check the bound.
    pub fn release(&mut self, depth: usize) {
        debug_assert!(depth <= self.rollback_limit);
        self.rollback_limit -= depth;
    }
}
