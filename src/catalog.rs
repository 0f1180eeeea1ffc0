// 📚 Catalog - ordered record of every join ever constructed
//
// Append-only in normal use. The counter is kept separately from the
// entry list; both move together on append and on reset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog<T> {
    entries: Vec<T>,
    counter: u64,
}

impl<T> Catalog<T> {
    pub fn new() -> Self {
        Catalog {
            entries: Vec::new(),
            counter: 0,
        }
    }

    /// Record a newly constructed join. Returns its 1-based sequence number.
    pub(crate) fn append(&mut self, entry: T) -> u64 {
        self.entries.push(entry);
        self.counter += 1;
        self.counter
    }

    /// Running count of appended entries
    pub fn count(&self) -> u64 {
        self.counter
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in construction order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn contains(&self, entry: &T) -> bool
    where
        T: PartialEq,
    {
        self.entries.contains(entry)
    }

    /// Clear entries and counter. Meant for isolating test cases.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.counter = 0;
    }
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}
