//! Host entity identification.
//!
//! Enemies reported by the host roster and by kill notifications are keyed by
//! `EntityId`. The engine never allocates these; it only compares them.
//!
//! ## Usage
//!
//! ```
//! use level_triggers::core::EntityId;
//!
//! let grunt = EntityId::new(17);
//! assert_eq!(grunt.raw(), 17);
//! assert_eq!(EntityId::from(17), grunt);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a host-side entity (usually an enemy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
