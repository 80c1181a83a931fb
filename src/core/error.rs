//! Error types for the content-loading boundary.
//!
//! Nothing inside the per-tick update can fail: malformed volumes are simply
//! never entered and unknown ids are ignored. Errors only surface when level
//! content is parsed or validated ahead of time.

/// Errors produced while loading or validating trigger content.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    /// A trigger declaration failed validation.
    #[error("invalid trigger '{id}': {reason}")]
    InvalidConfig {
        /// The offending trigger id.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A group declaration failed validation.
    #[error("invalid group '{id}': {reason}")]
    InvalidGroup {
        /// The offending group id.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The same id was declared twice in one level document.
    #[error("duplicate id '{id}' in level document")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// The level document is not valid JSON for the trigger schema.
    #[error("failed to parse level document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TriggerError {
    pub(crate) fn invalid(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for results carrying a [`TriggerError`].
pub type Result<T> = std::result::Result<T, TriggerError>;
