//! Scripted level triggers.
//!
//! Triggers turn spatial and game-state conditions into events: the player
//! walks into a volume, stands near a point, holds the interact key, looks at
//! something, clears a combat zone or gathers a set of collectibles.
//!
//! ## Key Components
//!
//! - [`TriggerConfig`]: Serializable declaration (shared base + one of six kinds)
//! - [`TriggerCallbacks`]: Per-trigger handler table supplied by the host
//! - [`ConditionSet`]: Optional gate evaluated before each trigger body
//! - [`TriggerInstance`]: Runtime state machine record
//! - [`TriggerGroupConfig`]: `all`/`any` aggregation over trigger completion
//! - [`TriggerSystem`]: The engine; owns everything and runs the tick
//! - [`TriggerEvent`] / [`EventSink`]: Typed outcomes and where they go
//!
//! ## State machine
//!
//! ```text
//! Idle --(condition met)--> Active --(fires, one-shot)--> Completed
//!   ^                         |
//!   |                         +--(fires, cooldown)--> Cooldown --(elapsed)--> Idle
//!   +--------(exit)-----------+
//! any --(disable)--> Disabled --(enable)--> Idle | Completed
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use glam::Vec3;
//! use level_triggers::triggers::{
//!     GroupMode, TriggerCallbacks, TriggerConfig, TriggerGroupConfig, TriggerSystem,
//! };
//!
//! let player = Rc::new(Cell::new(Vec3::new(10.0, 0.0, 0.0)));
//! let mut system = TriggerSystem::new();
//! let position = Rc::clone(&player);
//! system.set_player_position_getter(move || position.get());
//!
//! let greeted = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&greeted);
//! system.create_trigger_with(
//!     TriggerConfig::proximity("npc", Vec3::ZERO, 3.0).one_shot(),
//!     TriggerCallbacks::new().on_enter(move |_| counter.set(counter.get() + 1)),
//! );
//! system.create_group(TriggerGroupConfig::new("intro", ["npc"], GroupMode::All));
//!
//! system.update(0.016);
//! assert_eq!(greeted.get(), 0);
//!
//! player.set(Vec3::new(1.0, 0.0, 0.0));
//! system.update(0.016);
//! assert_eq!(greeted.get(), 1);
//! assert!(system.is_group_complete("intro"));
//! ```

mod callbacks;
mod condition;
mod config;
mod event;
mod group;
mod instance;
mod level;
mod registry;
mod strategy;
mod system;

pub use callbacks::{GroupCallback, TriggerCallbacks, TriggerObserver};
pub use condition::{ConditionContext, ConditionEvaluator, ConditionSet};
pub use config::{
    CollectibleTrigger, CombatTrigger, InteractionTrigger, LineOfSightTrigger, ProximityTrigger,
    TriggerConfig, TriggerKind, TriggerType, VolumeTrigger,
};
pub use event::{EventQueue, EventSink, TriggerEvent};
pub use group::{GroupMode, TriggerGroupConfig};
pub use instance::{TriggerInstance, TriggerState};
pub use level::LevelTriggers;
pub use registry::{TriggerEntry, TriggerRegistry};
pub use system::TriggerSystem;
