//! Score a session log against a scenario's reference actions.
//!
//! Every player log entry and every reference action is parsed with the
//! exact resolver against the same state, so `look leftleg` and
//! `look leftLeg` are the same action. Lines that do not parse never match.

use medsim_core::{Command, Scenario, ScenarioState};
use medsim_engine::resolve_command;
use tracing::{debug, warn};

use crate::config::GradingConfig;
use crate::report::GradeReport;

/// Grade with the default weights.
pub fn grade_session<P, B>(state: &ScenarioState, perfect: &[P], bad: &[B]) -> GradeReport
where
    P: AsRef<str>,
    B: AsRef<str>,
{
    grade_session_with(state, perfect, bad, &GradingConfig::default())
}

/// Grade a finished state against its scenario's reference actions.
pub fn grade_scenario(scenario: &Scenario, state: &ScenarioState) -> GradeReport {
    grade_session(state, &scenario.perfect_actions, &scenario.bad_actions)
}

/// Grade with explicit weights.
pub fn grade_session_with<P, B>(
    state: &ScenarioState,
    perfect: &[P],
    bad: &[B],
    config: &GradingConfig,
) -> GradeReport
where
    P: AsRef<str>,
    B: AsRef<str>,
{
    let log: Vec<Option<Command>> = state
        .player_entries()
        .map(|entry| resolve_command(&entry.text, state).ok())
        .collect();
    let perfect: Vec<(&str, Option<Command>)> = perfect
        .iter()
        .map(|a| (a.as_ref(), parse_reference(a.as_ref(), state)))
        .collect();
    let bad: Vec<(&str, Option<Command>)> = bad
        .iter()
        .map(|a| (a.as_ref(), parse_reference(a.as_ref(), state)))
        .collect();

    let mut missed = Vec::new();
    let mut matched = 0;
    for (text, action) in &perfect {
        let hit = action
            .as_ref()
            .and_then(|action| log.iter().position(|cmd| cmd.as_ref() == Some(action)));
        match hit {
            Some(i) => {
                debug!(action = %text, position = i, "matched key action");
                matched += 1;
            }
            None => missed.push(*text),
        }
    }

    let total = perfect.len();
    let in_order = total > 0 && matched == total && is_subsequence(&perfect, &log);
    let order_bonus = if in_order { config.order_bonus } else { 0.0 };

    let mut offenses = Vec::new();
    let bad_actions_count = log
        .iter()
        .flatten()
        .filter(|cmd| {
            let hit = bad
                .iter()
                .find(|(_, action)| action.as_ref() == Some(*cmd));
            if let Some((text, _)) = hit {
                debug!(action = %text, "bad action in log");
                offenses.push(*text);
            }
            hit.is_some()
        })
        .count();
    let penalty = bad_actions_count as f64 * config.bad_action_penalty;

    let base = if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64 * 100.0
    };
    let score = (base + order_bonus - penalty).clamp(0.0, 100.0);

    let mut feedback = vec![format!(
        "Completed {matched} of {total} key actions. Score: {score:.0}."
    )];
    if in_order {
        feedback.push(format!(
            "Key actions were performed in the expected order (+{order_bonus:.0})."
        ));
    } else if matched == total && total > 0 {
        feedback.push("Every key action was taken, but not in the expected order.".to_string());
    }
    feedback.extend(missed.iter().map(|text| format!("Missed: {text}")));
    feedback.extend(offenses.iter().map(|text| {
        format!(
            "Avoid: {text} (-{:.0})",
            config.bad_action_penalty
        )
    }));

    GradeReport {
        score,
        matched_actions: matched,
        total_perfect_actions: total,
        bad_actions_count,
        order_bonus,
        feedback,
    }
}

fn parse_reference(text: &str, state: &ScenarioState) -> Option<Command> {
    match resolve_command(text, state) {
        Ok(command) => Some(command),
        Err(err) => {
            warn!(action = text, error = %err, "reference action does not parse");
            None
        }
    }
}

/// Whether the reference actions appear in the log in the same relative
/// order, each at its own log entry.
fn is_subsequence(perfect: &[(&str, Option<Command>)], log: &[Option<Command>]) -> bool {
    let mut entries = log.iter();
    perfect.iter().all(|(_, action)| {
        action
            .as_ref()
            .is_some_and(|action| entries.any(|cmd| cmd.as_ref() == Some(action)))
    })
}
