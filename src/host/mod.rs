//! Host wiring.
//!
//! The engine reads world state through getters the host installs. Every hook
//! is optional: a missing player-position getter makes `update` a no-op, and a
//! missing condition getter means that condition is not evaluated.
//!
//! Hooks are held, never owned in the game-logic sense: they are plain boxed
//! closures that may be replaced between ticks, and `TriggerSystem::dispose`
//! drops them all.

use glam::Vec3;

use crate::core::EntityId;
use crate::geometry::Camera;

/// One entry of the host's enemy roster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Host entity id.
    pub id: EntityId,
    /// Current world position.
    pub position: Vec3,
    /// Is the enemy still alive?
    pub alive: bool,
}

impl EnemySnapshot {
    /// A living enemy at `position`.
    pub fn alive(id: impl Into<EntityId>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            alive: true,
        }
    }

    /// A dead enemy at `position`.
    pub fn dead(id: impl Into<EntityId>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            alive: false,
        }
    }
}

type Getter<T> = Box<dyn Fn() -> T>;
type Predicate = Box<dyn Fn(&str) -> bool>;

/// Host-supplied getters and predicates.
#[derive(Default)]
pub struct HostHooks {
    camera: Option<Getter<Camera>>,
    player_position: Option<Getter<Vec3>>,
    player_health: Option<Getter<f32>>,
    inventory: Option<Predicate>,
    flags: Option<Predicate>,
    enemies: Option<Getter<Vec<EnemySnapshot>>>,
    interact_key: Option<Getter<bool>>,
    custom_condition: Option<Predicate>,
}

impl HostHooks {
    /// Create an empty hook table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_camera(&mut self, getter: impl Fn() -> Camera + 'static) {
        self.camera = Some(Box::new(getter));
    }

    pub fn set_player_position(&mut self, getter: impl Fn() -> Vec3 + 'static) {
        self.player_position = Some(Box::new(getter));
    }

    pub fn set_player_health(&mut self, getter: impl Fn() -> f32 + 'static) {
        self.player_health = Some(Box::new(getter));
    }

    pub fn set_inventory(&mut self, checker: impl Fn(&str) -> bool + 'static) {
        self.inventory = Some(Box::new(checker));
    }

    pub fn set_flags(&mut self, checker: impl Fn(&str) -> bool + 'static) {
        self.flags = Some(Box::new(checker));
    }

    pub fn set_enemies(&mut self, getter: impl Fn() -> Vec<EnemySnapshot> + 'static) {
        self.enemies = Some(Box::new(getter));
    }

    pub fn set_interact_key(&mut self, checker: impl Fn() -> bool + 'static) {
        self.interact_key = Some(Box::new(checker));
    }

    pub fn set_custom_condition(&mut self, evaluator: impl Fn(&str) -> bool + 'static) {
        self.custom_condition = Some(Box::new(evaluator));
    }

    /// Current camera, if a camera getter is installed.
    #[must_use]
    pub fn camera(&self) -> Option<Camera> {
        self.camera.as_ref().map(|get| get())
    }

    /// Current player position, if a position getter is installed.
    #[must_use]
    pub fn player_position(&self) -> Option<Vec3> {
        self.player_position.as_ref().map(|get| get())
    }

    /// Current player health, if a health getter is installed.
    #[must_use]
    pub fn player_health(&self) -> Option<f32> {
        self.player_health.as_ref().map(|get| get())
    }

    /// Does the player hold `item`? `None` without an inventory checker.
    #[must_use]
    pub fn has_item(&self, item: &str) -> Option<bool> {
        self.inventory.as_ref().map(|check| check(item))
    }

    /// Is `flag` set? `None` without a flag checker.
    #[must_use]
    pub fn flag(&self, flag: &str) -> Option<bool> {
        self.flags.as_ref().map(|check| check(flag))
    }

    /// Evaluate a custom condition key. `None` without an evaluator.
    #[must_use]
    pub fn custom(&self, key: &str) -> Option<bool> {
        self.custom_condition.as_ref().map(|eval| eval(key))
    }

    /// Current enemy roster. Empty without a roster getter.
    #[must_use]
    pub fn enemies(&self) -> Vec<EnemySnapshot> {
        self.enemies.as_ref().map(|get| get()).unwrap_or_default()
    }

    /// Is the interact key down? `false` without a key checker.
    #[must_use]
    pub fn interact_pressed(&self) -> bool {
        self.interact_key.as_ref().is_some_and(|check| check())
    }

    /// Drop every installed hook.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Debug for HostHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostHooks")
            .field("camera", &self.camera.is_some())
            .field("player_position", &self.player_position.is_some())
            .field("player_health", &self.player_health.is_some())
            .field("inventory", &self.inventory.is_some())
            .field("flags", &self.flags.is_some())
            .field("enemies", &self.enemies.is_some())
            .field("interact_key", &self.interact_key.is_some())
            .field("custom_condition", &self.custom_condition.is_some())
            .finish()
    }
}

/// Host state sampled once at the start of a tick.
///
/// Every trigger evaluated during the tick sees the same snapshot. The enemy
/// roster is only fetched if a combat trigger asks for it.
#[derive(Debug)]
pub struct FrameInput {
    pub player_position: Vec3,
    pub player_health: Option<f32>,
    pub camera: Option<Camera>,
    pub interact_pressed: bool,
    enemies: Option<Vec<EnemySnapshot>>,
}

impl FrameInput {
    /// Sample the hooks. `None` when no player-position getter is installed.
    #[must_use]
    pub fn capture(hooks: &HostHooks) -> Option<Self> {
        let player_position = hooks.player_position()?;
        Some(Self {
            player_position,
            player_health: hooks.player_health(),
            camera: hooks.camera(),
            interact_pressed: hooks.interact_pressed(),
            enemies: None,
        })
    }

    /// The enemy roster for this tick, fetched on first use.
    pub fn enemies(&mut self, hooks: &HostHooks) -> &[EnemySnapshot] {
        self.enemies.get_or_insert_with(|| hooks.enemies())
    }
}
