pub mod check;
pub mod classify;
pub mod demo;
pub mod grade;
pub mod play;
pub mod realize;

use std::fs;
use std::path::Path;

use colored::Colorize;

use medsim_core::sample::fall_from_ledge;
use medsim_core::{Scenario, ScenarioState};
use medsim_engine::{ResultKind, Turn};
use medsim_intent::{CORPUS, IntentClassifier, IntentConfig};

/// Read and validate a scenario file, or fall back to the built-in scenario.
fn load_scenario(path: Option<&Path>) -> Result<Scenario, String> {
    let Some(path) = path else {
        return Ok(fall_from_ledge());
    };
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let scenario =
        Scenario::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?;
    scenario
        .validate()
        .map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(scenario)
}

/// Read a saved session state.
fn load_state(path: &Path) -> Result<ScenarioState, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    ScenarioState::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

/// Train the intent classifier on the built-in corpus.
fn train_classifier(threshold: f64) -> Result<IntentClassifier, String> {
    let config = IntentConfig::default().with_threshold(threshold);
    IntentClassifier::train(CORPUS, config)
        .map_err(|e| format!("failed to train intent classifier: {e}"))
}

/// Print one turn's narration, coloured by outcome.
fn print_turn(turn: &Turn) {
    if turn.canonical.was_nlp_parsed {
        println!(
            "  {}",
            format!(
                "(understood as \"{}\", {:.0}%)",
                turn.canonical.text,
                turn.canonical.confidence * 100.0
            )
            .dimmed()
        );
    }
    let narration = match turn.kind {
        ResultKind::Success => turn.narration.normal(),
        ResultKind::ParseFailure | ResultKind::InvalidCommand | ResultKind::GuardFailure => {
            turn.narration.yellow()
        }
        ResultKind::UnexpectedError => turn.narration.red(),
    };
    println!("{narration}\n");
}
