//! Verb handlers and the registry that routes commands to them.
//!
//! Each verb module builds one [`Pipeline`](crate::pipeline::Pipeline). The
//! [`Engine`] maps verbs to those pipelines and is the single entry point for
//! executing a resolved command against a state.

pub mod ask;
pub mod control;
pub mod guards;
pub mod instruct;
pub mod look;
pub mod measure;
pub mod movement;
pub mod palpate;
pub mod remove;
pub mod survey;
pub mod treatment;
pub mod wear;

use std::collections::HashMap;
use std::sync::OnceLock;

use medsim_core::{Command, ScenarioState, Verb};
use tracing::debug;

use crate::error::EngineError;
use crate::pipeline::{Handler, Request};
use crate::response::Response;

/// Verb → handler registry.
pub struct Engine {
    handlers: HashMap<Verb, Box<dyn Handler>>,
}

impl Engine {
    /// An engine with no handlers registered.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register (or replace) the handler for `verb`.
    pub fn with_handler(mut self, verb: Verb, handler: impl Handler + 'static) -> Self {
        self.handlers.insert(verb, Box::new(handler));
        self
    }

    /// An engine with every built-in verb registered.
    pub fn standard() -> Self {
        Self::new()
            .with_handler(Verb::Look, look::pipeline())
            .with_handler(Verb::Ask, ask::pipeline())
            .with_handler(Verb::Measure, measure::pipeline())
            .with_handler(Verb::Palpate, palpate::pipeline())
            .with_handler(Verb::Apply, treatment::apply())
            .with_handler(Verb::Control, control::pipeline())
            .with_handler(Verb::Move, movement::pipeline())
            .with_handler(Verb::Wear, wear::pipeline())
            .with_handler(Verb::Perform, treatment::perform())
            .with_handler(Verb::Instruct, instruct::pipeline())
            .with_handler(Verb::Remove, remove::pipeline())
            .with_handler(Verb::Survey, survey::pipeline())
    }

    /// Whether a handler is registered for `verb`.
    pub fn handles(&self, verb: Verb) -> bool {
        self.handlers.contains_key(&verb)
    }

    /// Run `command` against `state`. The input state is never modified.
    pub fn execute(&self, command: &Command, state: &ScenarioState) -> Response {
        debug!(command = %command, "executing");
        let Some(handler) = self.handlers.get(&command.verb) else {
            return Response::unexpected(&EngineError::NoHandler(command.verb), state);
        };
        let response = handler.handle(&Request { command, state });
        debug!(command = %command, kind = %response.kind, "executed");
        response
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Execute `command` with the shared standard engine.
pub fn execute_command(command: &Command, state: &ScenarioState) -> Response {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(Engine::standard).execute(command, state)
}

#[cfg(test)]
pub(crate) mod testing {
    use medsim_core::sample::fall_from_ledge;
    use medsim_core::{Distance, ScenarioState};

    use crate::parser::resolve_command;
    use crate::response::Response;

    /// The sample scenario's opening state.
    pub fn state() -> ScenarioState {
        fall_from_ledge().initial_state
    }

    /// The opening state with the player already beside the patient.
    pub fn near_state() -> ScenarioState {
        let mut state = state();
        state.player.distance = Distance::Near;
        state
    }

    /// Resolve and execute one line of canonical input.
    pub fn run(input: &str, state: &ScenarioState) -> Response {
        match resolve_command(input, state) {
            Ok(command) => super::execute_command(&command, state),
            Err(e) => Response::parse_failure(e.to_string(), state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResultKind;
    use medsim_core::Object;
    use testing::state;

    #[test]
    fn standard_engine_handles_every_verb() {
        let engine = Engine::standard();
        for &verb in Verb::ALL {
            assert!(engine.handles(verb), "{verb}");
        }
    }

    #[test]
    fn missing_handler_is_unexpected() {
        let engine = Engine::new();
        let s = state();
        let r = engine.execute(&Command::new(Verb::Look), &s);
        assert_eq!(r.kind, ResultKind::UnexpectedError);
        assert_eq!(r.state, s);
    }

    #[test]
    fn custom_handler_replaces_builtin() {
        let engine = Engine::standard().with_handler(Verb::Look, survey::pipeline());
        let s = state();
        let r = engine.execute(&Command::new(Verb::Look).with_object(Object::Patient), &s);
        assert_eq!(r.kind, ResultKind::GuardFailure);
    }

    #[test]
    fn input_state_is_never_mutated() {
        let s = testing::near_state();
        let before = s.clone();
        for input in ["remove leftLeg", "apply splint leftLeg", "move out", "wear gloves"] {
            let _ = testing::run(input, &s);
        }
        assert_eq!(s, before);
    }
}
