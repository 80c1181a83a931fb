//! Trigger registry.
//!
//! Stores one entry (config + runtime instance + handler table) per trigger
//! id. Iteration follows registration order: a trigger re-registered under an
//! existing id moves to the end, as if removed and inserted again.

use rustc_hash::FxHashMap;

use crate::core::TriggerId;

use super::callbacks::TriggerCallbacks;
use super::config::TriggerConfig;
use super::instance::TriggerInstance;

/// A registered trigger.
#[derive(Debug)]
pub struct TriggerEntry {
    pub config: TriggerConfig,
    pub instance: TriggerInstance,
    pub callbacks: TriggerCallbacks,
}

impl TriggerEntry {
    /// Create an entry with a fresh instance.
    pub fn new(config: TriggerConfig, callbacks: TriggerCallbacks) -> Self {
        let instance = TriggerInstance::new(config.enabled);
        Self {
            config,
            instance,
            callbacks,
        }
    }
}

/// Insertion-ordered trigger storage.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    /// Ids in registration order.
    order: Vec<TriggerId>,

    /// Entries by id.
    entries: FxHashMap<TriggerId, TriggerEntry>,
}

impl TriggerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry. Returns the entry previously stored under the id.
    pub fn insert(&mut self, entry: TriggerEntry) -> Option<TriggerEntry> {
        let id = entry.config.id.clone();
        let previous = self.remove(id.as_str());
        self.order.push(id.clone());
        self.entries.insert(id, entry);
        previous
    }

    /// Unregister a trigger.
    pub fn remove(&mut self, id: &str) -> Option<TriggerEntry> {
        let entry = self.entries.remove(id)?;
        self.order.retain(|tid| tid.as_str() != id);
        Some(entry)
    }

    /// Get an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TriggerEntry> {
        self.entries.get(id)
    }

    /// Get a mutable entry by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut TriggerEntry> {
        self.entries.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Ids in registration order.
    #[must_use]
    pub fn ids(&self) -> &[TriggerId] {
        &self.order
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TriggerEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Visit every entry mutably, in registration order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut TriggerEntry)) {
        let Self { order, entries } = self;
        for id in order.iter() {
            if let Some(entry) = entries.get_mut(id) {
                f(entry);
            }
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> Vec<TriggerId> {
        self.entries.clear();
        std::mem::take(&mut self.order)
    }

    /// Get total trigger count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
