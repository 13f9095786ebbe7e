//! A running session: raw text in, narration out, state and log kept.

use std::sync::Arc;

use medsim_core::{Command, LogEntry, Scenario, ScenarioState};
use medsim_intent::{CanonicalCommand, IntentClassifier};
use tracing::debug;

use crate::handlers::Engine;
use crate::parser::resolve_command;
use crate::response::{Response, ResultKind};

/// What one call to [`Session::process`] produced.
#[derive(Debug, Clone)]
pub struct Turn {
    /// The text the player typed.
    pub input: String,
    /// What the intent layer turned it into.
    pub canonical: CanonicalCommand,
    /// The resolved command, when parsing succeeded.
    pub command: Option<Command>,
    /// What the player is told.
    pub narration: String,
    /// Outcome category.
    pub kind: ResultKind,
}

/// A single player's run through a scenario.
///
/// Commands are applied one after another; each turn replaces the state with
/// the one the engine returned and appends a player and a narrator entry to
/// its log.
pub struct Session {
    state: ScenarioState,
    engine: Engine,
    classifier: Option<Arc<IntentClassifier>>,
}

impl Session {
    /// Start from `state` with the standard engine and no intent layer.
    pub fn new(state: ScenarioState) -> Self {
        Self {
            state,
            engine: Engine::standard(),
            classifier: None,
        }
    }

    /// Start from a scenario's initial state.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(scenario.initial_state.clone())
    }

    /// Route raw input through a trained classifier first.
    pub fn with_classifier(mut self, classifier: Arc<IntentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Replace the engine.
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// The current state.
    pub fn state(&self) -> &ScenarioState {
        &self.state
    }

    /// Consume the session, keeping its final state.
    pub fn into_state(self) -> ScenarioState {
        self.state
    }

    /// Record a free-text note on the player.
    pub fn note(&mut self, text: impl Into<String>) {
        self.state = self.state.with_note(text);
    }

    /// Process one line of player input.
    pub fn process(&mut self, input: &str) -> Turn {
        let canonical = match &self.classifier {
            Some(classifier) => classifier.canonicalize(input),
            None => CanonicalCommand::passthrough(input),
        };
        debug!(
            input,
            canonical = %canonical.text,
            nlp = canonical.was_nlp_parsed,
            "processing input"
        );

        let (command, response) = match resolve_command(&canonical.text, &self.state) {
            Ok(command) => {
                let response = self.engine.execute(&command, &self.state);
                (Some(command), response)
            }
            Err(err) => (None, Response::parse_failure(err.to_string(), &self.state)),
        };

        let logged = command
            .as_ref()
            .map(Command::to_string)
            .unwrap_or_else(|| canonical.text.clone());
        let entries = [
            LogEntry::player(logged).with_raw(input),
            LogEntry::narrator(response.narration.clone()),
        ];
        self.state = response.state.with_log(entries);

        Turn {
            input: input.to_string(),
            canonical,
            command,
            narration: response.narration,
            kind: response.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsim_core::sample::fall_from_ledge;
    use medsim_core::{Author, Distance};

    fn session() -> Session {
        Session::from_scenario(&fall_from_ledge())
    }

    fn nlp_session() -> Session {
        let classifier = IntentClassifier::standard().unwrap();
        session().with_classifier(Arc::new(classifier))
    }

    #[test]
    fn successful_turn_updates_state_and_log() {
        let mut s = session();
        let turn = s.process("move in");
        assert_eq!(turn.kind, ResultKind::Success);
        assert_eq!(s.state().player.distance, Distance::Near);

        let log = &s.state().log;
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].author, Author::Player);
        assert_eq!(log[0].text, "move in");
        assert_eq!(log[0].raw, None);
        assert_eq!(log[1].author, Author::Narrator);
        assert_eq!(log[1].text, turn.narration);
    }

    #[test]
    fn failed_turns_are_logged_without_changing_state() {
        let mut s = session();
        let before = s.state().patient.clone();
        let turn = s.process("dance wildly");
        assert_eq!(turn.kind, ResultKind::ParseFailure);
        assert!(turn.command.is_none());
        assert_eq!(s.state().patient, before);
        assert_eq!(s.state().log.len(), 2);
        assert_eq!(s.state().log[0].text, "dance wildly");
    }

    #[test]
    fn player_entries_use_canonical_syntax() {
        let mut s = session();
        s.process("MOVE In");
        assert_eq!(s.state().log[0].text, "move in");
        assert_eq!(s.state().log[0].raw.as_deref(), Some("MOVE In"));
    }

    #[test]
    fn natural_language_goes_through_the_classifier() {
        let mut s = nlp_session();
        s.process("move in");
        let turn = s.process("check the patient's pulse");
        assert!(turn.canonical.was_nlp_parsed);
        assert_eq!(turn.canonical.text, "measure pulse");
        assert_eq!(turn.kind, ResultKind::Success);
        assert_eq!(turn.narration, "The pulse is 100 beats per minute and regular.");

        let entry = &s.state().log[2];
        assert_eq!(entry.text, "measure pulse");
        assert_eq!(entry.raw.as_deref(), Some("check the patient's pulse"));
    }

    #[test]
    fn unclassified_text_falls_back_to_exact_syntax() {
        let mut s = nlp_session();
        let turn = s.process("xqzt blorf");
        assert!(!turn.canonical.was_nlp_parsed);
        assert_eq!(turn.kind, ResultKind::ParseFailure);
    }

    #[test]
    fn notes_are_kept() {
        let mut s = session();
        s.note("leg looks bad");
        assert_eq!(s.state().player.notes, vec!["leg looks bad".to_string()]);
        assert!(s.state().log.is_empty());
    }
}
