//! Error type for document store operations.

use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A conditional put or update was rejected because its predicate did
    /// not hold against the stored item.
    #[error("conditional check failed on {collection}")]
    ConditionFailed { collection: &'static str },

    #[error("no document in {collection} for key {key}")]
    NotFound { collection: &'static str, key: String },

    #[error("invalid key for {collection}: {reason}")]
    InvalidKey {
        collection: &'static str,
        reason: String,
    },

    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("document does not match expected shape: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing service failed; the message is the raw backend error.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn invalid_key(collection: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            collection,
            reason: reason.into(),
        }
    }

    pub fn is_condition_failed(&self) -> bool {
        matches!(self, Self::ConditionFailed { .. })
    }
}
