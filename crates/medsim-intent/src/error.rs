//! Error types for classifier training.

use thiserror::Error;

/// Result type for intent operations.
pub type IntentResult<T> = Result<T, IntentError>;

/// Errors raised while training a classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    /// The training corpus has no intents, or no usable examples.
    #[error("training corpus is empty")]
    EmptyCorpus,

    /// An intent definition is unusable.
    #[error("malformed intent '{name}': {reason}")]
    MalformedIntent {
        /// The intent's name as written.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}
