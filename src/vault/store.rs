//! In-memory collection of entries with alias resolution and search.
//!
//! A `Store` is created empty or decoded from a vault file, mutated only
//! through command `apply` phases, and tracks whether it holds unsaved
//! changes so unchanged vaults are never rewritten.

use std::collections::BTreeMap;

use serde_json::Value;

use super::entry::Entry;

#[derive(Debug, Default, Clone)]
pub struct Store {
    /// Entries keyed by name.  Ordered, so listing is deterministic.
    entries: BTreeMap<String, Entry>,

    /// Top-level vault data that is not an entry, kept so a save writes
    /// it back unchanged.
    auxiliary: BTreeMap<String, Value>,

    /// Set by every mutation, cleared only by a successful save.
    dirty: bool,
}

impl Store {
    /// An empty store for a fresh vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a clean store from decoded parts.
    pub(crate) fn from_parts(
        entries: BTreeMap<String, Entry>,
        auxiliary: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            entries,
            auxiliary,
            dirty: false,
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Resolve `key` as a name first, then as an alias.
    ///
    /// Alias resolution scans entries in name order and returns the first
    /// hit.  Alias uniqueness means at most one entry can match.
    pub fn lookup(&self, key: &str) -> Option<&Entry> {
        self.entries
            .get(key)
            .or_else(|| self.entries.values().find(|e| e.aliases.contains(key)))
    }

    /// Returns `true` if `key` resolves to an entry.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Name of the entry `key` resolves to, if any.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.lookup(key).map(|e| e.name.as_str())
    }

    /// Entries matching both filters.  A `None` filter lets everything
    /// through; results come back in name order.
    pub fn search(&self, name_or_alias: Option<&str>, tag: Option<&str>) -> Vec<&Entry> {
        self.entries
            .values()
            .filter(|e| {
                name_or_alias.map_or(true, |needle| {
                    e.name.contains(needle) || e.aliases.iter().any(|a| a.contains(needle))
                })
            })
            .filter(|e| tag.map_or(true, |needle| e.tags.iter().any(|t| t.contains(needle))))
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Insert `entry` by name, replacing any entry with the same name.
    ///
    /// Commands check for collisions before calling this.
    pub fn add(&mut self, entry: Entry) {
        self.entries.insert(entry.name.clone(), entry);
        self.dirty = true;
    }

    /// Remove the entry `key` resolves to.  Removing by alias removes the
    /// whole owning entry.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(name) = self.resolve(key).map(str::to_owned) else {
            return false;
        };
        self.entries.remove(&name);
        self.dirty = true;
        true
    }

    /// Apply `edit` to the entry `key` resolves to, then refresh its
    /// `updated_at` and mark the store dirty.
    ///
    /// Returns the entry's name, or `None` if nothing matched.
    pub fn modify<F>(&mut self, key: &str, edit: F) -> Option<String>
    where
        F: FnOnce(&mut Entry),
    {
        let name = self.resolve(key)?.to_owned();
        let entry = self.entries.get_mut(&name)?;
        edit(entry);
        entry.touch();
        self.dirty = true;
        Some(name)
    }

    // ------------------------------------------------------------------
    // Dirty tracking
    // ------------------------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by persistence after the vault hit the disk.
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn auxiliary(&self) -> &BTreeMap<String, Value> {
        &self.auxiliary
    }
}
