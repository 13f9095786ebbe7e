//! `look`: observe the scene, the patient, a body part, or the medical tag.

use std::collections::HashMap;
use std::ops::ControlFlow;

use medsim_core::findings::BleedSeverity;
use medsim_core::Object;

use crate::handlers::guards::{NOT_NEAR, near};
use crate::narrate::{humanize, list, sentences};
use crate::pipeline::{Pipeline, Request};
use crate::realize::{realize_part, realize_patient};
use crate::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
enum Sight {
    #[default]
    Environment,
    Hazards,
    Patient,
    BodyPart,
    Tag,
}

/// Context for `look`.
#[derive(Debug, Default)]
pub struct LookContext {
    sight: Sight,
    part: Option<String>,
}

/// Build the `look` pipeline.
pub fn pipeline() -> Pipeline<LookContext> {
    let table = HashMap::from([
        (Sight::Environment, environment()),
        (Sight::Hazards, hazards()),
        (Sight::Patient, patient()),
        (Sight::BodyPart, body_part()),
        (Sight::Tag, tag()),
    ]);

    Pipeline::<LookContext>::new("look")
        .enrich(|req, mut ctx: LookContext| {
            ctx.sight = match &req.command.object {
                None | Some(Object::Environment) => Sight::Environment,
                Some(Object::Hazards) => Sight::Hazards,
                Some(Object::Patient) => Sight::Patient,
                Some(Object::BodyPart(name)) => {
                    ctx.part = Some(name.clone());
                    Sight::BodyPart
                }
                Some(Object::Target(t)) if t == "tag" => Sight::Tag,
                Some(Object::Target(t)) => {
                    return ControlFlow::Break(Response::invalid(
                        format!("You don't see any {} here.", humanize(t)),
                        req.state,
                    ));
                }
            };
            ControlFlow::Continue(ctx)
        })
        .dispatch(table, |ctx| Some(ctx.sight))
}

fn environment() -> Pipeline<LookContext> {
    Pipeline::<LookContext>::new("look environment").transform(|req, _| {
        let env = &req.state.environment;
        let text = if env.description.is_empty() {
            "There is nothing remarkable about your surroundings."
        } else {
            env.description.as_str()
        };
        Response::observation(text, req.state)
    })
}

fn hazards() -> Pipeline<LookContext> {
    Pipeline::<LookContext>::new("look hazards")
        .transform(|req, _| Response::observation(hazard_text(req), req.state))
}

/// Narration for the hazards in the environment.
pub(crate) fn hazard_text(req: &Request<'_>) -> String {
    let hazards = &req.state.environment.hazards;
    if hazards.is_empty() {
        "You don't see any hazards.".to_string()
    } else {
        format!("You notice {}.", list(hazards))
    }
}

fn patient() -> Pipeline<LookContext> {
    Pipeline::<LookContext>::new("look patient").transform(|req, _| {
        let patient = &req.state.patient;
        let position = format!("The patient is {}.", patient.position.describe());
        let text = if req.state.player.is_near() {
            let bleed = realize_patient(req.state).bleed;
            let bleeding = (bleed != BleedSeverity::None).then(|| format!("You see {bleed} bleeding."));
            sentences([
                patient.description_near.clone(),
                position,
                bleeding.unwrap_or_default(),
            ])
        } else {
            sentences([patient.description_far.clone(), position])
        };
        Response::observation(text, req.state)
    })
}

fn body_part() -> Pipeline<LookContext> {
    Pipeline::<LookContext>::new("look body part").transform(|req, ctx| {
        let Some(part) = ctx
            .part
            .as_deref()
            .and_then(|name| req.state.patient.body_part(name))
        else {
            return Response::unexpected(
                &crate::error::EngineError::MissingContext("look body part"),
                req.state,
            );
        };
        let realized = realize_part(req.state, part);
        let mut lines = vec![realized.description];
        lines.extend(realized.findings);
        Response::observation(sentences(lines), req.state)
    })
}

fn tag() -> Pipeline<LookContext> {
    Pipeline::<LookContext>::new("look tag")
        .guard_msg(near, NOT_NEAR)
        .guard_msg(
            |req, _| req.state.patient.medical_tag.is_some(),
            "The patient isn't wearing a medical tag.",
        )
        .transform(|req, _| {
            let text = req.state.patient.medical_tag.as_deref().unwrap_or_default();
            Response::observation(format!("The medical tag reads: {text}"), req.state)
        })
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{near_state, run, state};
    use crate::response::ResultKind;

    #[test]
    fn bare_look_describes_environment() {
        let r = run("look", &state());
        assert_eq!(r.kind, ResultKind::Success);
        assert!(r.narration.starts_with("A rocky trail"));
    }

    #[test]
    fn looking_at_hazards_lists_them() {
        let r = run("look hazards", &state());
        insta::assert_snapshot!(
            r.narration,
            @"You notice loose rocks on the slope above and a steep drop-off to the east."
        );
    }

    #[test]
    fn patient_description_depends_on_distance() {
        let far = run("look patient", &state());
        assert_eq!(
            far.narration,
            "A person is lying on the trail, clutching their left leg. The patient is lying on their back."
        );

        let near = run("look patient", &near_state());
        assert!(near.narration.contains("grimacing"));
        assert!(near.narration.ends_with("You see minor bleeding."));
    }

    #[test]
    fn covered_part_hides_its_findings() {
        let r = run("look leftLeg", &state());
        assert_eq!(r.narration, "Jeans cover the left leg.");
    }

    #[test]
    fn exposed_part_shows_ailment_text() {
        let exposed = run("remove leftLeg", &near_state()).state;
        let r = run("look leftleg", &exposed);
        assert_eq!(
            r.narration,
            "The left shin is swollen. The shin is angulated midway down with a bruise spreading."
        );
    }

    #[test]
    fn medical_tag_needs_a_closer_look() {
        assert_eq!(run("look tag", &state()).kind, ResultKind::GuardFailure);
        let r = run("look tag", &near_state());
        assert_eq!(r.narration, "The medical tag reads: Allergic to penicillin.");
    }

    #[test]
    fn unknown_things_are_invalid() {
        assert_eq!(run("look unicorn", &state()).kind, ResultKind::InvalidCommand);
    }
}
