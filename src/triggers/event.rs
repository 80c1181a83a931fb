//! Trigger events and the sink they are emitted into.
//!
//! The engine converts trigger outcomes into typed `TriggerEvent`s and pushes
//! them into an `EventSink` supplied by the host. The default sink,
//! [`EventQueue`], buffers events until the host drains them.
//!
//! ## Wire names
//!
//! Events serialize with a `type` tag matching the host event bus:
//! `TRIGGER_ENTER`, `TRIGGER_EXIT`, `TRIGGER_STAY`, `TRIGGER_INTERACT`,
//! `TRIGGER_LINE_OF_SIGHT`, `TRIGGER_COMBAT_COMPLETE`, `TRIGGER_COLLECTIBLE`
//! and `TRIGGER_GROUP_COMPLETE`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{GroupId, TriggerId};

use super::config::TriggerType;
use super::group::GroupMode;

/// An outcome of trigger evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TriggerEvent {
    /// Player entered a volume, proximity radius or interaction radius.
    #[serde(rename = "TRIGGER_ENTER")]
    Enter {
        trigger_id: TriggerId,
        trigger_type: TriggerType,
    },

    /// Player left a volume, proximity radius or interaction radius.
    #[serde(rename = "TRIGGER_EXIT")]
    Exit {
        trigger_id: TriggerId,
        trigger_type: TriggerType,
    },

    /// Player is still inside a volume.
    #[serde(rename = "TRIGGER_STAY")]
    Stay {
        trigger_id: TriggerId,
        trigger_type: TriggerType,
        /// Time since the player entered.
        duration_ms: f64,
    },

    /// Interaction completed.
    #[serde(rename = "TRIGGER_INTERACT")]
    Interact { trigger_id: TriggerId },

    /// Camera looked at the target long enough.
    #[serde(rename = "TRIGGER_LINE_OF_SIGHT")]
    LineOfSight {
        trigger_id: TriggerId,
        target_position: Vec3,
    },

    /// Combat zone cleared.
    #[serde(rename = "TRIGGER_COMBAT_COMPLETE")]
    CombatComplete {
        trigger_id: TriggerId,
        enemies_killed: usize,
    },

    /// Required collectibles gathered. Carries the pickup that completed the set.
    #[serde(rename = "TRIGGER_COLLECTIBLE")]
    Collectible {
        trigger_id: TriggerId,
        collectible_id: String,
    },

    /// A trigger group's completion predicate became true.
    #[serde(rename = "TRIGGER_GROUP_COMPLETE")]
    GroupComplete { group_id: GroupId, mode: GroupMode },
}

impl TriggerEvent {
    /// Event bus name of this event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Enter { .. } => "TRIGGER_ENTER",
            Self::Exit { .. } => "TRIGGER_EXIT",
            Self::Stay { .. } => "TRIGGER_STAY",
            Self::Interact { .. } => "TRIGGER_INTERACT",
            Self::LineOfSight { .. } => "TRIGGER_LINE_OF_SIGHT",
            Self::CombatComplete { .. } => "TRIGGER_COMBAT_COMPLETE",
            Self::Collectible { .. } => "TRIGGER_COLLECTIBLE",
            Self::GroupComplete { .. } => "TRIGGER_GROUP_COMPLETE",
        }
    }

    /// The trigger this event is about. `None` for group events.
    #[must_use]
    pub fn trigger_id(&self) -> Option<&TriggerId> {
        match self {
            Self::Enter { trigger_id, .. }
            | Self::Exit { trigger_id, .. }
            | Self::Stay { trigger_id, .. }
            | Self::Interact { trigger_id }
            | Self::LineOfSight { trigger_id, .. }
            | Self::CombatComplete { trigger_id, .. }
            | Self::Collectible { trigger_id, .. } => Some(trigger_id),
            Self::GroupComplete { .. } => None,
        }
    }
}

impl std::fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GroupComplete { group_id, .. } => write!(f, "{} {}", self.name(), group_id),
            _ => match self.trigger_id() {
                Some(id) => write!(f, "{} {}", self.name(), id),
                None => f.write_str(self.name()),
            },
        }
    }
}

/// Destination for trigger events.
pub trait EventSink {
    /// Receive one event.
    fn emit(&mut self, event: TriggerEvent);
}

/// Buffering sink. Events accumulate until drained.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<TriggerEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered event, oldest first.
    pub fn drain(&mut self) -> Vec<TriggerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Buffered events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[TriggerEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventQueue {
    fn emit(&mut self, event: TriggerEvent) {
        self.events.push(event);
    }
}
