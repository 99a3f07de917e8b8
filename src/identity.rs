// 🪪 Identity Allocator
//
// Every person gets a number from one shared sequence, students and
// teachers alike. Numbers are handed out once and never come back.

use serde::{Deserialize, Serialize};

/// Seed used when no configuration says otherwise (first id is 1001)
pub const DEFAULT_ID_SEED: u64 = 1000;

/// Sequential id source owned by a single `Directory`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    counter: u64,
}

impl IdAllocator {
    pub fn new(seed: u64) -> Self {
        IdAllocator { counter: seed }
    }

    /// Pre-increment and return the new value
    ///
    /// Panics only if the sequence runs past `u64::MAX`, which would
    /// otherwise silently reuse identities.
    pub fn next(&mut self) -> u64 {
        self.counter = self
            .counter
            .checked_add(1)
            .unwrap_or_else(|| panic!("identity sequence exhausted at {}", self.counter));
        self.counter
    }

    /// Last id handed out (the seed if none yet)
    pub fn last_issued(&self) -> u64 {
        self.counter
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_SEED)
    }
}
