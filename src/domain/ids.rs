use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest id handed out or accepted from a snapshot. Ids stay exact when
/// the snapshot is read by a JavaScript host.
pub const MAX_ID: u64 = (1 << 53) - 1;

/// Identifier of a column on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(u64);

impl ColumnId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a card on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(u64);

impl CardId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of unique identifiers for columns and cards.
///
/// Every value returned by `next` must differ from every value previously
/// returned or passed to `reserve`.
pub trait IdGenerator: Send {
    /// Hands out a fresh identifier
    fn next(&mut self) -> u64;

    /// Marks an identifier as taken by restored state.
    ///
    /// Generators that cannot collide with restored ids may ignore this.
    fn reserve(&mut self, _used: u64) {}
}

/// Monotonic counter starting right after a baseline
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    last: u64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first id is `baseline + 1`
    pub fn new(baseline: u64) -> Self {
        Self { last: baseline }
    }

    /// The most recently issued or reserved id
    pub fn last(&self) -> u64 {
        self.last
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next(&mut self) -> u64 {
        // never wraps; ids stay within MAX_ID unless the baseline exceeds it
        self.last = self.last.checked_add(1).unwrap_or(self.last);
        self.last
    }

    fn reserve(&mut self, used: u64) {
        self.last = self.last.max(used);
    }
}

/// Random identifiers drawn from v4 UUIDs, truncated to `MAX_ID`
#[derive(Debug, Default, Clone)]
pub struct RandomIdGenerator {
    issued: std::collections::HashSet<u64>,
}

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next(&mut self) -> u64 {
        loop {
            let (high, _) = uuid::Uuid::new_v4().as_u64_pair();
            let candidate = high & MAX_ID;
            if candidate != 0 && self.issued.insert(candidate) {
                return candidate;
            }
        }
    }

    fn reserve(&mut self, used: u64) {
        self.issued.insert(used);
    }
}
