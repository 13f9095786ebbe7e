//! The result of executing one command.

use std::fmt;

use medsim_core::ScenarioState;
use tracing::error;

use crate::error::EngineError;

/// Outcome category of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// The command ran and may have changed the state.
    Success,
    /// The input could not be parsed into a complete command.
    ParseFailure,
    /// The verb was understood but the target is not valid for it.
    InvalidCommand,
    /// A precondition was not met.
    GuardFailure,
    /// A scenario or pipeline bug.
    UnexpectedError,
}

impl ResultKind {
    /// Wire name, e.g. `guard_failure`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ParseFailure => "parse_failure",
            Self::InvalidCommand => "invalid_command",
            Self::GuardFailure => "guard_failure",
            Self::UnexpectedError => "unexpected_error",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Narration plus the state the session continues from.
///
/// Every non-success response carries an unchanged copy of the input state.
#[derive(Debug, Clone)]
pub struct Response {
    /// What the player is told.
    pub narration: String,
    /// The state after the command.
    pub state: ScenarioState,
    /// Outcome category.
    pub kind: ResultKind,
}

impl Response {
    /// A successful command that produced `state`.
    pub fn success(narration: impl Into<String>, state: ScenarioState) -> Self {
        Self {
            narration: narration.into(),
            state,
            kind: ResultKind::Success,
        }
    }

    /// A command that read the state without changing it.
    pub fn observation(narration: impl Into<String>, state: &ScenarioState) -> Self {
        Self::success(narration, state.clone())
    }

    /// The input could not be parsed.
    pub fn parse_failure(narration: impl Into<String>, state: &ScenarioState) -> Self {
        Self::unchanged(narration, state, ResultKind::ParseFailure)
    }

    /// The target is not valid for the verb.
    pub fn invalid(narration: impl Into<String>, state: &ScenarioState) -> Self {
        Self::unchanged(narration, state, ResultKind::InvalidCommand)
    }

    /// A precondition failed.
    pub fn guard_failure(narration: impl Into<String>, state: &ScenarioState) -> Self {
        Self::unchanged(narration, state, ResultKind::GuardFailure)
    }

    /// Something is wrong with the scenario or the engine.
    pub fn unexpected(err: &EngineError, state: &ScenarioState) -> Self {
        error!(error = %err, "unexpected error while executing command");
        Self::unchanged(
            "Something about this scenario is broken. Please report it to the instructor.",
            state,
            ResultKind::UnexpectedError,
        )
    }

    fn unchanged(narration: impl Into<String>, state: &ScenarioState, kind: ResultKind) -> Self {
        Self {
            narration: narration.into(),
            state: state.clone(),
            kind,
        }
    }

    /// Whether the command succeeded.
    pub fn is_success(&self) -> bool {
        self.kind == ResultKind::Success
    }
}
