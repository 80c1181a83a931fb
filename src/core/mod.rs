//! Core engine types: identifiers, settings and errors.
//!
//! These are shared by every other module and carry no trigger semantics.

pub mod config;
pub mod entity;
pub mod error;
pub mod ids;

pub use config::{SystemConfig, DEFAULT_LOOK_ANGLE_RAD, DEFAULT_MAX_LOOK_DISTANCE, TIME_EPSILON_MS};
pub use entity::EntityId;
pub use error::{Result, TriggerError};
pub use ids::{GroupId, TriggerId};
