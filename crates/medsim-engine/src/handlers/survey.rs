//! `survey`: a sweep of the scene or a head-to-toe look at the patient.

use std::collections::HashMap;
use std::ops::ControlFlow;

use medsim_core::Object;

use crate::handlers::guards::{NOT_NEAR, near};
use crate::handlers::look::hazard_text;
use crate::narrate::{humanize, sentences};
use crate::pipeline::Pipeline;
use crate::realize::realize_part;
use crate::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
enum Sweep {
    #[default]
    Scene,
    Patient,
}

/// Context for `survey`.
#[derive(Debug, Default)]
pub struct SurveyContext {
    sweep: Sweep,
}

/// Build the `survey` pipeline.
pub fn pipeline() -> Pipeline<SurveyContext> {
    let table = HashMap::from([(Sweep::Scene, scene()), (Sweep::Patient, patient())]);

    Pipeline::<SurveyContext>::new("survey")
        .enrich(|req, mut ctx: SurveyContext| {
            ctx.sweep = match &req.command.object {
                None | Some(Object::Environment) | Some(Object::Hazards) => Sweep::Scene,
                Some(Object::Target(t)) if t == "scene" => Sweep::Scene,
                Some(Object::Patient) => Sweep::Patient,
                Some(other) => {
                    return ControlFlow::Break(Response::invalid(
                        format!("You can't survey the {}.", humanize(other.token())),
                        req.state,
                    ));
                }
            };
            ControlFlow::Continue(ctx)
        })
        .dispatch(table, |ctx| Some(ctx.sweep))
}

fn scene() -> Pipeline<SurveyContext> {
    Pipeline::<SurveyContext>::new("survey scene").transform(|req, _| {
        let text = sentences([
            "You take in the scene.".to_string(),
            req.state.environment.description.clone(),
            hazard_text(req),
        ]);
        Response::observation(text, req.state)
    })
}

fn patient() -> Pipeline<SurveyContext> {
    Pipeline::<SurveyContext>::new("survey patient")
        .guard_msg(near, NOT_NEAR)
        .transform(|req, _| {
            let body = req.state.patient.body_parts.iter().map(|part| {
                let realized = realize_part(req.state, part);
                sentences(std::iter::once(realized.description).chain(realized.findings))
            });
            let text = sentences(
                std::iter::once("You work from head to toe.".to_string()).chain(body),
            );
            Response::observation(text, req.state)
        })
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{near_state, run, state};
    use crate::response::ResultKind;

    #[test]
    fn scene_survey_includes_hazards() {
        for input in ["survey", "survey scene", "survey environment"] {
            let r = run(input, &state());
            assert_eq!(r.kind, ResultKind::Success, "{input}");
            assert!(r.narration.starts_with("You take in the scene. A rocky trail"));
            assert!(r.narration.ends_with("a steep drop-off to the east."));
        }
    }

    #[test]
    fn patient_survey_walks_every_part() {
        let r = run("survey patient", &near_state());
        assert_eq!(r.kind, ResultKind::Success);
        assert!(r.narration.starts_with("You work from head to toe."));
        assert!(r.narration.contains("A two-inch laceration above the left ear oozes blood."));
        assert!(r.narration.contains("Jeans cover the left leg."));
        assert!(!r.narration.contains("angulated"));
    }

    #[test]
    fn patient_survey_needs_contact() {
        let s = state();
        let r = run("survey patient", &s);
        assert_eq!(r.kind, ResultKind::GuardFailure);
        assert_eq!(r.state, s);
        assert_eq!(run("survey leftLeg", &near_state()).kind, ResultKind::InvalidCommand);
    }
}
