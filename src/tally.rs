//! Insertion-ordered frequency counter.
//!
//! Keys keep the order in which they were first seen, so a stable sort on
//! the counts breaks ties by first encounter.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Tally<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V: Default> Tally<V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Mutable slot for `key`, created with `V::default()` on first sight.
    pub fn entry(&mut self, key: &str) -> &mut V {
        let pos = match self.index.get(key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(key.to_string(), pos);
                self.entries.push((key.to_string(), V::default()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl Tally<usize> {
    pub fn bump(&mut self, key: &str) {
        *self.entry(key) += 1;
    }

    /// Entries with `count >= min_count`, descending by count, at most `limit`.
    pub fn top(self, min_count: usize, limit: usize) -> Vec<(String, usize)> {
        let mut kept: Vec<(String, usize)> = self
            .entries
            .into_iter()
            .filter(|(_, c)| *c >= min_count)
            .collect();
        // sort_by is stable: equal counts stay in first-seen order
        kept.sort_by(|a, b| b.1.cmp(&a.1));
        kept.truncate(limit);
        kept
    }
}
