//! Level documents: the triggers and groups authored for one level.
//!
//! ```
//! use level_triggers::triggers::LevelTriggers;
//!
//! let level = LevelTriggers::from_json(r#"{
//!     "triggers": [
//!         { "id": "gate", "type": "proximity", "position": [0.0, 0.0, 0.0], "radius": 3.0 }
//!     ],
//!     "groups": [
//!         { "id": "intro", "trigger_ids": ["gate"], "mode": "any" }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(level.triggers.len(), 1);
//! assert_eq!(level.groups.len(), 1);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Result, TriggerError};

use super::config::TriggerConfig;
use super::group::TriggerGroupConfig;

/// Serializable trigger content for one level.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelTriggers {
    #[serde(default)]
    pub triggers: Vec<TriggerConfig>,
    #[serde(default)]
    pub groups: Vec<TriggerGroupConfig>,
}

impl LevelTriggers {
    /// Parse and validate a JSON level document.
    pub fn from_json(json: &str) -> Result<Self> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every declaration and reject duplicate ids.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for trigger in &self.triggers {
            trigger.validate()?;
            if !seen.insert(trigger.id.as_str()) {
                return Err(TriggerError::DuplicateId {
                    id: trigger.id.as_str().to_owned(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for group in &self.groups {
            group.validate()?;
            if !seen.insert(group.id.as_str()) {
                return Err(TriggerError::DuplicateId {
                    id: group.id.as_str().to_owned(),
                });
            }
        }
        Ok(())
    }
}
