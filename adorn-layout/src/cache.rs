//! Per-record layout cache for decorations.
//!
//! One decoration definition is shared by every record it decorates (e.g.
//! every element of a list), so its row state is stored per record path.
//! Entries are created on first measurement and then mutated in place
//! every frame. They are retained across frames and reclaimed either
//! explicitly ([`DecorationCache::forget`]) or by age ([`DecorationCache::gc`]).

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::button_group::ButtonGroup;
use crate::primitives::Size;

/// Layout state for one record.
#[derive(Debug, Clone)]
pub struct LayoutEntry {
    pub group: ButtonGroup,
    /// Row size from the most recent measurement.
    pub size: Size,
    generation: u64,
}

impl LayoutEntry {
    fn new(group: ButtonGroup, generation: u64) -> Self {
        Self {
            group,
            size: Size::ZERO,
            generation,
        }
    }
}

/// Record path -> layout entry, with generation-based expiry.
#[derive(Debug, Default)]
pub struct DecorationCache {
    entries: HashMap<String, LayoutEntry>,

    /// Current frame generation (for expiry tracking)
    generation: u64,

    /// Stats for debugging
    #[cfg(debug_assertions)]
    pub hits: u64,
    #[cfg(debug_assertions)]
    pub misses: u64,
}

impl DecorationCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame.
    ///
    /// This increments the generation counter but doesn't clear old entries
    /// (they expire through [`gc`](Self::gc) when not accessed).
    pub fn begin_frame(&mut self) {
        self.generation += 1;
    }

    /// Fetch the entry for `path`, creating it with `make_group` on first use.
    pub fn get_or_insert_with(
        &mut self,
        path: &str,
        make_group: impl FnOnce() -> ButtonGroup,
    ) -> &mut LayoutEntry {
        let generation = self.generation;
        let entry = match self.entries.entry(path.to_owned()) {
            Entry::Occupied(occupied) => {
                #[cfg(debug_assertions)]
                {
                    self.hits += 1;
                }
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => {
                #[cfg(debug_assertions)]
                {
                    self.misses += 1;
                }
                tracing::debug!("Creating layout entry for {}", path);
                vacant.insert(LayoutEntry::new(make_group(), generation))
            }
        };
        entry.generation = generation;
        entry
    }

    /// Current frame generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Look up an entry and mark it as recently used.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut LayoutEntry> {
        let generation = self.generation;
        let entry = self.entries.get_mut(path)?;
        entry.generation = generation;
        Some(entry)
    }

    /// Look up an entry without touching it.
    pub fn get(&self, path: &str) -> Option<&LayoutEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Drop the entry of a record that no longer exists.
    pub fn forget(&mut self, path: &str) -> bool {
        let removed = self.entries.remove(path).is_some();
        if removed {
            tracing::debug!("Evicted layout entry for {}", path);
        }
        removed
    }

    /// Remove entries not accessed in the last `max_age` frames.
    ///
    /// Returns how many entries were dropped.
    pub fn gc(&mut self, max_age: u64) -> usize {
        let cutoff = self.generation.saturating_sub(max_age);
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.generation >= cutoff);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::debug!("Collected {} stale layout entries", dropped);
        }
        dropped
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all cached entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get cache stats (debug builds only).
    #[cfg(debug_assertions)]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
