//! # level-triggers
//!
//! A scripted-event trigger engine for level content.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven**: Triggers and groups are plain serializable
//!    declarations. Side effects live in handler tables next to them.
//!
//! 2. **Host-Agnostic**: The engine reads the world only through optional
//!    getters (player position, camera, inventory, flags, enemies). Missing
//!    wiring degrades to "not evaluated", never to an error.
//!
//! 3. **Deterministic Ticks**: Triggers are evaluated in registration order
//!    against one frame snapshot, on an internal millisecond clock advanced
//!    only by `update`.
//!
//! ## Modules
//!
//! - `core`: Identifiers, engine settings, errors
//! - `geometry`: Containment tests and camera math
//! - `host`: Getter hooks and per-tick frame snapshot
//! - `triggers`: Configs, state machine, strategies, groups and the engine

pub mod core;
pub mod geometry;
pub mod host;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{EntityId, GroupId, Result, SystemConfig, TriggerError, TriggerId};

pub use crate::geometry::{is_inside, within_radius, Camera, Volume, VolumeShape, VolumeSize};

pub use crate::host::{EnemySnapshot, HostHooks};

pub use crate::triggers::{
    ConditionSet, EventQueue, EventSink, GroupMode, LevelTriggers, TriggerCallbacks, TriggerConfig,
    TriggerEvent, TriggerGroupConfig, TriggerInstance, TriggerKind, TriggerObserver, TriggerState,
    TriggerSystem, TriggerType,
};
