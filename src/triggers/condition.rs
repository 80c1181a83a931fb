//! Trigger conditions.
//!
//! A `ConditionSet` gates a trigger before its type-specific logic runs.
//! Each field is an independent requirement; all present requirements must
//! hold. Requirements that depend on a host hook that is not installed are
//! skipped rather than failed, so a partially wired host still runs content.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::TriggerId;
use crate::host::HostHooks;

/// Requirements that must hold before a trigger may activate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionSet {
    /// The player must carry this inventory item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_item: Option<String>,

    /// This game flag must be set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_flag: Option<String>,

    /// Inclusive lower bound on player health.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_health: Option<f32>,

    /// Inclusive upper bound on player health.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_health: Option<f32>,

    /// This trigger must already be completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_trigger: Option<TriggerId>,

    /// Key passed to the host's custom condition evaluator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

impl ConditionSet {
    /// Create an empty condition set (always satisfied).
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.required_item = Some(item.into());
        self
    }

    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.required_flag = Some(flag.into());
        self
    }

    #[must_use]
    pub fn with_min_health(mut self, min: f32) -> Self {
        self.min_health = Some(min);
        self
    }

    #[must_use]
    pub fn with_max_health(mut self, max: f32) -> Self {
        self.max_health = Some(max);
        self
    }

    /// Require health within `[min, max]` (builder pattern).
    #[must_use]
    pub fn with_health_range(self, min: f32, max: f32) -> Self {
        self.with_min_health(min).with_max_health(max)
    }

    /// Require another trigger to be completed first (builder pattern).
    #[must_use]
    pub fn after(mut self, trigger: impl Into<TriggerId>) -> Self {
        self.required_trigger = Some(trigger.into());
        self
    }

    #[must_use]
    pub fn with_custom(mut self, key: impl Into<String>) -> Self {
        self.custom = Some(key.into());
        self
    }

    /// Check if no requirement is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Context for evaluating trigger conditions.
pub struct ConditionContext<'a> {
    /// Host hooks for inventory, flags and custom predicates.
    pub hooks: &'a HostHooks,
    /// Player health sampled for this tick, if a getter is installed.
    pub player_health: Option<f32>,
    /// Ids of completed triggers.
    pub completed: &'a FxHashSet<TriggerId>,
}

impl<'a> ConditionContext<'a> {
    /// Create a new context.
    pub fn new(hooks: &'a HostHooks, completed: &'a FxHashSet<TriggerId>) -> Self {
        Self {
            hooks,
            player_health: hooks.player_health(),
            completed,
        }
    }

    /// Use an already-sampled health value (builder pattern).
    #[must_use]
    pub fn with_health(mut self, health: Option<f32>) -> Self {
        self.player_health = health;
        self
    }
}

/// Evaluator for trigger conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if every evaluable requirement holds. Short-circuits on the
    /// first failure.
    pub fn all_satisfied(conditions: &ConditionSet, ctx: &ConditionContext) -> bool {
        if let Some(item) = &conditions.required_item {
            if ctx.hooks.has_item(item) == Some(false) {
                return false;
            }
        }

        if let Some(flag) = &conditions.required_flag {
            if ctx.hooks.flag(flag) == Some(false) {
                return false;
            }
        }

        if let Some(health) = ctx.player_health {
            if conditions.min_health.is_some_and(|min| health < min) {
                return false;
            }
            if conditions.max_health.is_some_and(|max| health > max) {
                return false;
            }
        }

        if let Some(prerequisite) = &conditions.required_trigger {
            if !ctx.completed.contains(prerequisite) {
                return false;
            }
        }

        if let Some(key) = &conditions.custom {
            if ctx.hooks.custom(key) == Some(false) {
                return false;
            }
        }

        true
    }
}
