//! Deduplicated string literal pool.

use rustc_hash::FxHashMap;
use zeus_ir::Name;

/// String literals in first-seen order. Each distinct body gets one slot,
/// which becomes one `_L<n>` label in the data section.
#[derive(Clone, Debug, Default)]
pub struct StringPool {
    strings: Vec<Name>,
    index: FxHashMap<Name, usize>,
}

impl StringPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for `body`, allocating one on first sight.
    pub fn intern(&mut self, body: Name) -> usize {
        if let Some(&slot) = self.index.get(&body) {
            return slot;
        }
        let slot = self.strings.len();
        self.strings.push(body);
        self.index.insert(body, slot);
        slot
    }

    pub fn lookup(&self, body: Name) -> Option<usize> {
        self.index.get(&body).copied()
    }

    pub fn get(&self, slot: usize) -> Option<Name> {
        self.strings.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Name)> + '_ {
        self.strings.iter().copied().enumerate()
    }
}
