//! Predicates and enrich helpers shared by several verbs.

use std::ops::ControlFlow;

use medsim_core::command::QuestionCategory;
use medsim_core::{Object, Responsiveness};

use crate::narrate::humanize;
use crate::parser::require_modifier;
use crate::pipeline::{Flow, Request};
use crate::response::Response;

/// Failure narration for hands-on verbs used from a distance.
pub const NOT_NEAR: &str = "You need to move in closer to the patient first.";

/// The lowest responsiveness at which the patient can speak or follow instructions.
pub const SPEAKING_THRESHOLD: Responsiveness = Responsiveness::AlertOriented0;

/// Whether the player is beside the patient.
pub fn near<C>(request: &Request<'_>, _: &C) -> bool {
    request.state.player.is_near()
}

/// Whether the patient can talk at all.
pub fn can_speak<C>(request: &Request<'_>, _: &C) -> bool {
    request.state.patient.responsiveness >= SPEAKING_THRESHOLD
}

/// Minimum responsiveness needed to answer a question category.
pub fn answer_threshold(category: QuestionCategory) -> Responsiveness {
    match category {
        QuestionCategory::Symptoms => Responsiveness::AlertOriented0,
        QuestionCategory::Identity => Responsiveness::AlertOriented1,
        QuestionCategory::Location => Responsiveness::AlertOriented2,
        QuestionCategory::Time => Responsiveness::AlertOriented3,
        QuestionCategory::Events => Responsiveness::AlertOriented4,
    }
}

/// The object token, or a parse failure asking for one.
pub fn object_token<'a>(request: &Request<'a>, prompt: &str) -> Result<&'a str, Response> {
    request
        .command
        .object
        .as_ref()
        .map(Object::token)
        .ok_or_else(|| Response::parse_failure(prompt, request.state))
}

/// Parse the object with a target vocabulary.
///
/// Missing object is a parse failure; a token outside the vocabulary is an
/// invalid command narrated by `reject`.
pub fn object_target<T>(
    request: &Request<'_>,
    prompt: &str,
    parse: impl Fn(&str) -> Option<T>,
    reject: impl Fn(&str) -> String,
) -> Result<T, Response> {
    let token = object_token(request, prompt)?;
    parse(token).ok_or_else(|| Response::invalid(reject(token), request.state))
}

/// The body part named by modifier `index`, by canonical name.
///
/// Missing modifier is a parse failure; a name the patient lacks is an
/// invalid command.
pub fn modifier_part(request: &Request<'_>, index: usize) -> Result<String, Response> {
    let token = require_modifier(request.command, index, "body part")
        .map_err(|e| Response::parse_failure(e.to_string(), request.state))?;
    request
        .state
        .patient
        .body_part(token)
        .map(|p| p.name.clone())
        .ok_or_else(|| {
            Response::invalid(
                format!("The patient doesn't have a {}.", humanize(token)),
                request.state,
            )
        })
}

/// Lift a stage result into pipeline flow.
pub fn flow<C>(result: Result<C, Response>) -> Flow<C> {
    match result {
        Ok(ctx) => ControlFlow::Continue(ctx),
        Err(response) => ControlFlow::Break(response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_rise_with_category() {
        assert!(
            answer_threshold(QuestionCategory::Identity) < answer_threshold(QuestionCategory::Events)
        );
        assert_eq!(answer_threshold(QuestionCategory::Symptoms), SPEAKING_THRESHOLD);
    }
}
