//! Runtime trigger state.
//!
//! One `TriggerInstance` exists per registered config. It is created when the
//! trigger is registered and destroyed when it is removed.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::EntityId;

/// Lifecycle state of a trigger.
///
/// ```text
/// idle -> active -> idle | cooldown | completed
/// cooldown -> idle            (cooldown elapsed)
/// any -> disabled -> idle     (explicit disable / enable)
/// completed                   (terminal until reset)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    /// Waiting for its activation condition.
    #[default]
    Idle,
    /// Player engaged (inside, in range, looking, holding).
    Active,
    /// Repeatable trigger waiting out its cooldown.
    Cooldown,
    /// Switched off by the host.
    Disabled,
    /// Fired; stays here until reset.
    Completed,
}

impl TriggerState {
    /// Does the per-tick update skip this trigger entirely?
    #[must_use]
    pub const fn is_dormant(self) -> bool {
        matches!(self, Self::Disabled | Self::Completed)
    }
}

impl std::fmt::Display for TriggerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Cooldown => "cooldown",
            Self::Disabled => "disabled",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Mutable runtime record of one trigger.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriggerInstance {
    pub state: TriggerState,

    /// Player inside the volume / radius (or camera on target, for
    /// line-of-sight).
    pub player_inside: bool,

    /// Engine time of the last rising edge.
    pub enter_time_ms: f64,

    /// Engine time of the last firing.
    pub last_activation_ms: Option<f64>,

    /// Timed interaction progress in `[0, 1]`.
    pub interaction_progress: f32,

    /// Milliseconds the interact key has been held toward the current firing.
    pub interaction_held_ms: f64,

    /// Was the interact key down last tick (rising-edge detection).
    pub interact_was_pressed: bool,

    /// Accumulated look time toward the current firing.
    pub look_duration_ms: f64,

    /// Enemies killed inside a combat zone. Grows until reset.
    pub killed_enemies: FxHashSet<EntityId>,

    /// Collectibles picked up. Grows until reset.
    pub collected_items: FxHashSet<String>,

    /// The most recent new pickup.
    pub last_collected: Option<String>,
}

impl TriggerInstance {
    /// Create a fresh instance; `enabled == false` starts it disabled.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            state: if enabled {
                TriggerState::Idle
            } else {
                TriggerState::Disabled
            },
            ..Self::default()
        }
    }

    /// Clear all progress and return to idle.
    pub fn reset(&mut self) {
        *self = Self::new(true);
    }

    /// Clear interaction hold progress.
    pub fn clear_interaction(&mut self) {
        self.interaction_progress = 0.0;
        self.interaction_held_ms = 0.0;
    }

    /// Has the cooldown started at the last firing elapsed at `now_ms`?
    #[must_use]
    pub fn cooldown_elapsed(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        self.last_activation_ms
            .is_none_or(|last| now_ms - last >= cooldown_ms)
    }
}
