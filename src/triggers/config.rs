//! Trigger declarations.
//!
//! A `TriggerConfig` is immutable, serializable level content: a shared base
//! (id, position, one-shot, cooldown, conditions, tags) plus one of six
//! type-specific payloads. Callbacks are attached separately through
//! [`TriggerCallbacks`](super::TriggerCallbacks).
//!
//! ## JSON shape
//!
//! ```
//! use level_triggers::triggers::{TriggerConfig, TriggerType};
//!
//! let config: TriggerConfig = serde_json::from_str(r#"{
//!     "id": "armory_door",
//!     "type": "interaction",
//!     "position": [4.0, 0.0, -2.0],
//!     "radius": 2.0,
//!     "prompt": "Open",
//!     "interaction_time_ms": 1000.0,
//!     "one_shot": true
//! }"#).unwrap();
//!
//! assert_eq!(config.trigger_type(), TriggerType::Interaction);
//! assert!(config.enabled);
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, TriggerError, TriggerId, DEFAULT_LOOK_ANGLE_RAD, DEFAULT_MAX_LOOK_DISTANCE};
use crate::geometry::{Volume, VolumeShape, VolumeSize};

use super::condition::ConditionSet;

/// Discriminant of the six trigger kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Volume,
    Proximity,
    Interaction,
    LineOfSight,
    Combat,
    Collectible,
}

impl TriggerType {
    /// Wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Proximity => "proximity",
            Self::Interaction => "interaction",
            Self::LineOfSight => "line_of_sight",
            Self::Combat => "combat",
            Self::Collectible => "collectible",
        }
    }
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player enters, stays in, or leaves a volume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumeTrigger {
    #[serde(flatten)]
    pub volume: Volume,
}

impl VolumeTrigger {
    pub fn new(volume: Volume) -> Self {
        Self { volume }
    }
}

/// Player comes within a radius, optionally while facing the trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProximityTrigger {
    pub radius: f32,

    /// Minimum dot product between camera forward and the direction from the
    /// player to the trigger. `None` disables the facing gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing_threshold: Option<f32>,
}

impl ProximityTrigger {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            facing_threshold: None,
        }
    }

    /// Require the camera to face the trigger (builder pattern).
    #[must_use]
    pub fn facing(mut self, min_dot: f32) -> Self {
        self.facing_threshold = Some(min_dot);
        self
    }
}

/// Player presses (or holds) the interact key within a radius.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionTrigger {
    pub radius: f32,

    /// Text the host shows while the player is in range.
    #[serde(default)]
    pub prompt: String,

    /// Hold duration. `None` or `0` fires on the press itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_time_ms: Option<f64>,
}

impl InteractionTrigger {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            prompt: String::new(),
            interaction_time_ms: None,
        }
    }

    /// Set the prompt text (builder pattern).
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Require the key to be held for `ms` milliseconds (builder pattern).
    #[must_use]
    pub fn with_hold_time(mut self, ms: f64) -> Self {
        self.interaction_time_ms = Some(ms);
        self
    }

    /// Hold duration if this is a timed interaction.
    #[must_use]
    pub fn hold_time_ms(&self) -> Option<f64> {
        self.interaction_time_ms.filter(|ms| *ms > 0.0)
    }
}

/// Camera looks at a point for some time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineOfSightTrigger {
    pub target_position: Vec3,

    #[serde(default = "default_max_distance")]
    pub max_distance: f32,

    #[serde(default = "default_angle_threshold")]
    pub angle_threshold_rad: f32,

    /// Required continuous look time. `0` fires immediately.
    #[serde(default)]
    pub look_duration_ms: f64,
}

fn default_max_distance() -> f32 {
    DEFAULT_MAX_LOOK_DISTANCE
}

fn default_angle_threshold() -> f32 {
    DEFAULT_LOOK_ANGLE_RAD
}

impl LineOfSightTrigger {
    pub fn new(target_position: Vec3) -> Self {
        Self {
            target_position,
            max_distance: DEFAULT_MAX_LOOK_DISTANCE,
            angle_threshold_rad: DEFAULT_LOOK_ANGLE_RAD,
            look_duration_ms: 0.0,
        }
    }

    #[must_use]
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    #[must_use]
    pub fn with_angle_threshold(mut self, radians: f32) -> Self {
        self.angle_threshold_rad = radians;
        self
    }

    #[must_use]
    pub fn with_look_duration(mut self, ms: f64) -> Self {
        self.look_duration_ms = ms;
        self
    }
}

/// Enemies inside a zone are defeated.
///
/// Completion policy, first match wins:
/// 1. `enemy_ids` non-empty: every listed id has been killed in the zone.
/// 2. `min_kills`: at least that many kills and no living enemy in the zone.
/// 3. Otherwise: at least one kill and no living enemy in the zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatTrigger {
    #[serde(flatten)]
    pub volume: Volume,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemy_ids: Option<Vec<EntityId>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_kills: Option<usize>,
}

impl CombatTrigger {
    pub fn new(volume: Volume) -> Self {
        Self {
            volume,
            enemy_ids: None,
            min_kills: None,
        }
    }

    /// Complete once these specific enemies are dead (builder pattern).
    #[must_use]
    pub fn with_enemies(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.enemy_ids = Some(ids.into_iter().collect());
        self
    }

    /// Complete after `kills` kills once the zone is clear (builder pattern).
    #[must_use]
    pub fn with_min_kills(mut self, kills: usize) -> Self {
        self.min_kills = Some(kills);
        self
    }

    /// The explicit enemy list, treating an empty list as absent.
    #[must_use]
    pub fn named_enemies(&self) -> Option<&[EntityId]> {
        self.enemy_ids.as_deref().filter(|ids| !ids.is_empty())
    }
}

/// A set of collectibles is picked up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectibleTrigger {
    pub collectible_ids: Vec<String>,

    /// Pickups needed. Defaults to the whole list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_count: Option<usize>,
}

impl CollectibleTrigger {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            collectible_ids: ids.into_iter().map(Into::into).collect(),
            required_count: None,
        }
    }

    #[must_use]
    pub fn with_required_count(mut self, count: usize) -> Self {
        self.required_count = Some(count);
        self
    }

    /// Number of pickups needed to fire. Never less than one, since firing
    /// reports the pickup that completed the set.
    #[must_use]
    pub fn required(&self) -> usize {
        self.required_count.unwrap_or(self.collectible_ids.len()).max(1)
    }

    /// Is `id` one of this trigger's collectibles?
    #[must_use]
    pub fn tracks(&self, id: &str) -> bool {
        self.collectible_ids.iter().any(|c| c == id)
    }
}

/// Type-specific payload of a trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerKind {
    Volume(VolumeTrigger),
    Proximity(ProximityTrigger),
    Interaction(InteractionTrigger),
    LineOfSight(LineOfSightTrigger),
    Combat(CombatTrigger),
    Collectible(CollectibleTrigger),
}

impl TriggerKind {
    #[must_use]
    pub fn trigger_type(&self) -> TriggerType {
        match self {
            Self::Volume(_) => TriggerType::Volume,
            Self::Proximity(_) => TriggerType::Proximity,
            Self::Interaction(_) => TriggerType::Interaction,
            Self::LineOfSight(_) => TriggerType::LineOfSight,
            Self::Combat(_) => TriggerType::Combat,
            Self::Collectible(_) => TriggerType::Collectible,
        }
    }
}

macro_rules! kind_from {
    ($($variant:ident($payload:ty)),* $(,)?) => {
        $(impl From<$payload> for TriggerKind {
            fn from(payload: $payload) -> Self {
                Self::$variant(payload)
            }
        })*
    };
}

kind_from!(
    Volume(VolumeTrigger),
    Proximity(ProximityTrigger),
    Interaction(InteractionTrigger),
    LineOfSight(LineOfSightTrigger),
    Combat(CombatTrigger),
    Collectible(CollectibleTrigger),
);

fn default_enabled() -> bool {
    true
}

/// A complete trigger declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Unique key.
    pub id: TriggerId,

    /// World-space anchor: volume centre, radius centre, or zone centre.
    #[serde(default)]
    pub position: Vec3,

    /// Fire at most once until reset.
    #[serde(default)]
    pub one_shot: bool,

    /// Initial enabled state.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Minimum time between firings of a repeatable trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_ms: Option<f64>,

    /// Gate evaluated before any type-specific logic runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<ConditionSet>,

    /// Free-form labels for content tooling.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub kind: TriggerKind,
}

impl TriggerConfig {
    /// Create a trigger declaration.
    ///
    /// ```
    /// use glam::Vec3;
    /// use level_triggers::geometry::Volume;
    /// use level_triggers::triggers::{TriggerConfig, VolumeTrigger};
    ///
    /// let config = TriggerConfig::new("hall", Vec3::ZERO, VolumeTrigger::new(Volume::sphere(5.0)))
    ///     .one_shot()
    ///     .with_tag("tutorial");
    /// assert!(config.one_shot);
    /// ```
    pub fn new(id: impl Into<TriggerId>, position: Vec3, kind: impl Into<TriggerKind>) -> Self {
        Self {
            id: id.into(),
            position,
            one_shot: false,
            enabled: true,
            cooldown_ms: None,
            conditions: None,
            tags: Vec::new(),
            kind: kind.into(),
        }
    }

    /// Volume trigger shorthand.
    pub fn volume(id: impl Into<TriggerId>, position: Vec3, shape: VolumeShape, size: impl Into<VolumeSize>) -> Self {
        Self::new(id, position, VolumeTrigger::new(Volume::new(shape, size)))
    }

    /// Proximity trigger shorthand.
    pub fn proximity(id: impl Into<TriggerId>, position: Vec3, radius: f32) -> Self {
        Self::new(id, position, ProximityTrigger::new(radius))
    }

    /// Make the trigger one-shot (builder pattern).
    #[must_use]
    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }

    /// Start disabled (builder pattern).
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Set a cooldown (builder pattern).
    #[must_use]
    pub fn with_cooldown(mut self, ms: f64) -> Self {
        self.cooldown_ms = Some(ms);
        self
    }

    /// Gate the trigger on conditions (builder pattern).
    #[must_use]
    pub fn with_conditions(mut self, conditions: ConditionSet) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Add a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn trigger_type(&self) -> TriggerType {
        self.kind.trigger_type()
    }

    /// Check if the trigger carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Effective cooldown. Only repeatable triggers have one.
    #[must_use]
    pub fn effective_cooldown_ms(&self) -> Option<f64> {
        if self.one_shot {
            return None;
        }
        self.cooldown_ms.filter(|ms| *ms > 0.0)
    }

    /// Validate the declaration for content loading.
    ///
    /// The runtime accepts any config; this catches authoring mistakes that
    /// would otherwise leave a trigger silently inert.
    pub fn validate(&self) -> Result<(), TriggerError> {
        let id = self.id.as_str();
        let fail = |reason: &str| Err(TriggerError::invalid(id, reason));

        if self.id.is_empty() {
            return fail("id must not be empty");
        }
        if !self.position.is_finite() {
            return fail("position must be finite");
        }
        if self.cooldown_ms.is_some_and(|ms| !ms.is_finite() || ms < 0.0) {
            return fail("cooldown must be a non-negative number of milliseconds");
        }
        if let Some(conditions) = &self.conditions {
            if let (Some(min), Some(max)) = (conditions.min_health, conditions.max_health) {
                if min > max {
                    return fail("min_health exceeds max_health");
                }
            }
        }

        match &self.kind {
            TriggerKind::Volume(VolumeTrigger { volume })
            | TriggerKind::Combat(CombatTrigger { volume, .. }) => {
                if !volume.is_well_formed() {
                    return fail("volume size must be positive and finite");
                }
            }
            TriggerKind::Proximity(p) => {
                if !(p.radius.is_finite() && p.radius > 0.0) {
                    return fail("radius must be positive");
                }
                if p.facing_threshold.is_some_and(|t| !(-1.0..=1.0).contains(&t)) {
                    return fail("facing threshold must lie in [-1, 1]");
                }
            }
            TriggerKind::Interaction(i) => {
                if !(i.radius.is_finite() && i.radius > 0.0) {
                    return fail("radius must be positive");
                }
                if i.interaction_time_ms.is_some_and(|ms| !ms.is_finite() || ms < 0.0) {
                    return fail("interaction time must be a non-negative number of milliseconds");
                }
            }
            TriggerKind::LineOfSight(l) => {
                if !l.target_position.is_finite() {
                    return fail("target position must be finite");
                }
                if !(l.max_distance.is_finite() && l.max_distance > 0.0) {
                    return fail("max distance must be positive");
                }
                if !(l.angle_threshold_rad.is_finite() && l.angle_threshold_rad > 0.0) {
                    return fail("angle threshold must be positive");
                }
                if !l.look_duration_ms.is_finite() || l.look_duration_ms < 0.0 {
                    return fail("look duration must be a non-negative number of milliseconds");
                }
            }
            TriggerKind::Collectible(c) => {
                if c.collectible_ids.is_empty() {
                    return fail("collectible list must not be empty");
                }
                if c.required() == 0 || c.required() > c.collectible_ids.len() {
                    return fail("required count must be between 1 and the number of collectibles");
                }
            }
        }
        Ok(())
    }
}
