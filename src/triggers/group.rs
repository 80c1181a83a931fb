//! Trigger groups.
//!
//! A group watches a list of trigger ids and completes once `all` or `any` of
//! them are in the completed set. Completion is write-once.
//!
//! Members are referenced by id only. A member that is never registered can
//! never count as completed, so an `all` group naming it never completes.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GroupId, TriggerError, TriggerId};

use super::callbacks::GroupCallback;

/// How member completion is aggregated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    /// Every member completed.
    #[default]
    All,
    /// At least one member completed.
    Any,
}

impl std::fmt::Display for GroupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Any => "any",
        })
    }
}

/// Serializable group declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerGroupConfig {
    pub id: GroupId,
    pub trigger_ids: SmallVec<[TriggerId; 4]>,
    #[serde(default)]
    pub mode: GroupMode,
}

impl TriggerGroupConfig {
    /// Create a group declaration.
    pub fn new<I, T>(id: impl Into<GroupId>, trigger_ids: I, mode: GroupMode) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TriggerId>,
    {
        Self {
            id: id.into(),
            trigger_ids: trigger_ids.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    /// Is the completion predicate satisfied by `completed`?
    ///
    /// An empty `all` group is vacuously satisfied; an empty `any` group never is.
    #[must_use]
    pub fn is_satisfied(&self, completed: &FxHashSet<TriggerId>) -> bool {
        let mut members = self.trigger_ids.iter().map(|id| completed.contains(id));
        match self.mode {
            GroupMode::All => members.all(|done| done),
            GroupMode::Any => members.any(|done| done),
        }
    }

    /// Validate the declaration for content loading.
    pub fn validate(&self) -> Result<(), TriggerError> {
        let fail = |reason: &str| {
            Err(TriggerError::InvalidGroup {
                id: self.id.as_str().to_owned(),
                reason: reason.to_owned(),
            })
        };
        if self.id.is_empty() {
            return fail("id must not be empty");
        }
        if self.trigger_ids.is_empty() {
            return fail("group must name at least one trigger");
        }
        Ok(())
    }
}

/// Runtime group record.
pub(crate) struct TriggerGroup {
    pub config: TriggerGroupConfig,
    pub completed: bool,
    pub callback: Option<GroupCallback>,
}

impl TriggerGroup {
    pub fn new(config: TriggerGroupConfig, callback: Option<GroupCallback>) -> Self {
        Self {
            config,
            completed: false,
            callback,
        }
    }
}

impl std::fmt::Debug for TriggerGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerGroup")
            .field("config", &self.config)
            .field("completed", &self.completed)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
