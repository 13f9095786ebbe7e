//! Error types for the command engine.

use medsim_core::{CoreError, Verb};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Why raw input could not become a [`Command`](medsim_core::Command).
///
/// The display text is narrated to the player as a `parse_failure`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing but whitespace.
    #[error("You pause, unsure what to do.")]
    Empty,

    /// The first word is not a known verb.
    #[error("You don't know how to \"{0}\".")]
    UnknownVerb(String),

    /// A verb needs a modifier that was not given.
    #[error("What should you {verb} it with? Name the {what}.")]
    MissingModifier {
        /// The verb that needs it.
        verb: Verb,
        /// What kind of modifier is expected.
        what: &'static str,
    },
}

/// Failures that indicate a broken scenario or a broken pipeline.
///
/// These never reach the player as errors; they are narrated as
/// `unexpected_error` responses and logged.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The scenario data violates an integrity rule.
    #[error("scenario integrity violation: {0}")]
    Integrity(#[from] CoreError),

    /// No handler is registered for the verb.
    #[error("no handler registered for \"{0}\"")]
    NoHandler(Verb),

    /// A pipeline ran out of stages without producing a response.
    #[error("pipeline \"{0}\" ended without a response")]
    IncompletePipeline(&'static str),

    /// A stage expected context an earlier stage should have provided.
    #[error("pipeline \"{0}\" is missing context from an earlier stage")]
    MissingContext(&'static str),
}
