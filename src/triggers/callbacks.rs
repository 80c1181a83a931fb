//! Host handler tables.
//!
//! Configs are plain data. Side effects a level attaches to a trigger (open a
//! door, start a dialogue) live in a `TriggerCallbacks` table registered next
//! to the config under the same id. Every entry is optional.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use level_triggers::triggers::TriggerCallbacks;
//!
//! let opened = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&opened);
//! let callbacks = TriggerCallbacks::new().on_enter(move |_| flag.set(true));
//! assert!(callbacks.has_enter());
//! ```

use crate::core::{GroupId, TriggerId};

use super::group::GroupMode;
use super::instance::TriggerState;

type Handler = Box<dyn FnMut(&TriggerId)>;
type TimedHandler = Box<dyn FnMut(&TriggerId, f64)>;
type CountHandler = Box<dyn FnMut(&TriggerId, usize)>;
type PickupHandler = Box<dyn FnMut(&TriggerId, &str, usize)>;

/// Optional side effects for one trigger.
#[derive(Default)]
pub struct TriggerCallbacks {
    enter: Option<Handler>,
    exit: Option<Handler>,
    stay: Option<TimedHandler>,
    interact: Option<Handler>,
    interact_cancel: Option<Handler>,
    look: Option<Handler>,
    look_away: Option<Handler>,
    combat_complete: Option<CountHandler>,
    item_collected: Option<PickupHandler>,
    collection_complete: Option<CountHandler>,
}

impl TriggerCallbacks {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Player entered (volume, proximity, interaction range).
    #[must_use]
    pub fn on_enter(mut self, f: impl FnMut(&TriggerId) + 'static) -> Self {
        self.enter = Some(Box::new(f));
        self
    }

    /// Player left (volume, proximity, interaction range).
    #[must_use]
    pub fn on_exit(mut self, f: impl FnMut(&TriggerId) + 'static) -> Self {
        self.exit = Some(Box::new(f));
        self
    }

    /// Player remains inside a volume; receives the dwell time in ms.
    #[must_use]
    pub fn on_stay(mut self, f: impl FnMut(&TriggerId, f64) + 'static) -> Self {
        self.stay = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_interact(mut self, f: impl FnMut(&TriggerId) + 'static) -> Self {
        self.interact = Some(Box::new(f));
        self
    }

    /// A timed interaction was interrupted before completing.
    #[must_use]
    pub fn on_interact_cancel(mut self, f: impl FnMut(&TriggerId) + 'static) -> Self {
        self.interact_cancel = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_look(mut self, f: impl FnMut(&TriggerId) + 'static) -> Self {
        self.look = Some(Box::new(f));
        self
    }

    /// The camera left the target after some look time had accumulated.
    #[must_use]
    pub fn on_look_away(mut self, f: impl FnMut(&TriggerId) + 'static) -> Self {
        self.look_away = Some(Box::new(f));
        self
    }

    /// Combat zone cleared; receives the kill count.
    #[must_use]
    pub fn on_combat_complete(mut self, f: impl FnMut(&TriggerId, usize) + 'static) -> Self {
        self.combat_complete = Some(Box::new(f));
        self
    }

    /// A tracked collectible was picked up; receives its id and the new count.
    #[must_use]
    pub fn on_item_collected(mut self, f: impl FnMut(&TriggerId, &str, usize) + 'static) -> Self {
        self.item_collected = Some(Box::new(f));
        self
    }

    /// Enough collectibles gathered; receives the count.
    #[must_use]
    pub fn on_collection_complete(mut self, f: impl FnMut(&TriggerId, usize) + 'static) -> Self {
        self.collection_complete = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn has_enter(&self) -> bool {
        self.enter.is_some()
    }

    /// Volume triggers with a stay handler do not complete on entry.
    #[must_use]
    pub fn has_stay(&self) -> bool {
        self.stay.is_some()
    }

    pub(crate) fn enter(&mut self, id: &TriggerId) {
        if let Some(f) = self.enter.as_mut() {
            f(id);
        }
    }

    pub(crate) fn exit(&mut self, id: &TriggerId) {
        if let Some(f) = self.exit.as_mut() {
            f(id);
        }
    }

    pub(crate) fn stay(&mut self, id: &TriggerId, dwell_ms: f64) {
        if let Some(f) = self.stay.as_mut() {
            f(id, dwell_ms);
        }
    }

    pub(crate) fn interact(&mut self, id: &TriggerId) {
        if let Some(f) = self.interact.as_mut() {
            f(id);
        }
    }

    pub(crate) fn interact_cancel(&mut self, id: &TriggerId) {
        if let Some(f) = self.interact_cancel.as_mut() {
            f(id);
        }
    }

    pub(crate) fn look(&mut self, id: &TriggerId) {
        if let Some(f) = self.look.as_mut() {
            f(id);
        }
    }

    pub(crate) fn look_away(&mut self, id: &TriggerId) {
        if let Some(f) = self.look_away.as_mut() {
            f(id);
        }
    }

    pub(crate) fn combat_complete(&mut self, id: &TriggerId, kills: usize) {
        if let Some(f) = self.combat_complete.as_mut() {
            f(id, kills);
        }
    }

    pub(crate) fn item_collected(&mut self, id: &TriggerId, item: &str, count: usize) {
        if let Some(f) = self.item_collected.as_mut() {
            f(id, item, count);
        }
    }

    pub(crate) fn collection_complete(&mut self, id: &TriggerId, count: usize) {
        if let Some(f) = self.collection_complete.as_mut() {
            f(id, count);
        }
    }
}

impl std::fmt::Debug for TriggerCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut set = Vec::new();
        for (name, present) in [
            ("enter", self.enter.is_some()),
            ("exit", self.exit.is_some()),
            ("stay", self.stay.is_some()),
            ("interact", self.interact.is_some()),
            ("interact_cancel", self.interact_cancel.is_some()),
            ("look", self.look.is_some()),
            ("look_away", self.look_away.is_some()),
            ("combat_complete", self.combat_complete.is_some()),
            ("item_collected", self.item_collected.is_some()),
            ("collection_complete", self.collection_complete.is_some()),
        ] {
            if present {
                set.push(name);
            }
        }
        f.debug_tuple("TriggerCallbacks").field(&set).finish()
    }
}

/// Completion handler for a trigger group.
pub type GroupCallback = Box<dyn FnMut(&GroupId, GroupMode)>;

/// Observer for debug visualisation and tooling.
///
/// A rendering layer can implement this to recolour trigger volumes on state
/// changes and drop its meshes when triggers are removed.
pub trait TriggerObserver {
    /// A trigger moved to `state`.
    fn state_changed(&mut self, id: &TriggerId, state: TriggerState);

    /// A trigger was removed from the registry.
    fn trigger_removed(&mut self, _id: &TriggerId) {}
}
