//! `measure`: vital signs from the realized patient, and limb findings from
//! a body part's aggregated effects.

use std::collections::HashMap;
use std::ops::ControlFlow;

use medsim_core::command::MeasureTarget;

use crate::error::EngineError;
use crate::handlers::guards::{NOT_NEAR, flow, modifier_part, object_target};
use crate::narrate::humanize;
use crate::pipeline::{Pipeline, Request};
use crate::realize::{RealizedPart, RealizedPatient, realize_patient};
use crate::response::Response;

/// Context for `measure`.
#[derive(Debug, Default)]
pub struct MeasureContext {
    target: Option<MeasureTarget>,
    part: Option<String>,
    patient: Option<RealizedPatient>,
}

impl MeasureContext {
    fn realized_part(&self) -> Option<&RealizedPart> {
        let name = self.part.as_deref()?;
        self.patient.as_ref()?.part(name)
    }
}

/// Build the `measure` pipeline.
pub fn pipeline() -> Pipeline<MeasureContext> {
    let table = HashMap::from([
        (MeasureTarget::Pulse, vital("measure pulse", pulse)),
        (MeasureTarget::Respirations, vital("measure respirations", respirations)),
        (MeasureTarget::Skin, vital("measure skin", skin)),
        (MeasureTarget::Pupils, vital("measure pupils", pupils)),
        (MeasureTarget::Temperature, vital("measure temperature", temperature)),
        (MeasureTarget::Responsiveness, vital("measure responsiveness", responsiveness)),
        (MeasureTarget::Circulation, circulation()),
        (MeasureTarget::Sensation, sensation()),
        (MeasureTarget::Motion, motion()),
    ]);

    Pipeline::<MeasureContext>::new("measure")
        .enrich(|req, mut ctx: MeasureContext| {
            flow(
                object_target(req, "Measure what?", MeasureTarget::parse, |t| {
                    format!("You don't know how to measure {}.", humanize(t))
                })
                .map(|t| {
                    ctx.target = Some(t);
                    ctx
                }),
            )
        })
        .guard_msg(
            |req, ctx| {
                req.state.player.is_near()
                    || matches!(
                        ctx.target,
                        Some(MeasureTarget::Respirations | MeasureTarget::Responsiveness)
                    )
            },
            NOT_NEAR,
        )
        .enrich(|req, mut ctx| match ctx.target {
            Some(t) if t.needs_body_part() => flow(modifier_part(req, 0).map(|part| {
                ctx.part = Some(part);
                ctx
            })),
            _ => ControlFlow::Continue(ctx),
        })
        .enrich(|req, mut ctx| {
            ctx.patient = Some(realize_patient(req.state));
            ControlFlow::Continue(ctx)
        })
        .dispatch(table, |ctx| ctx.target)
}

fn vital(name: &'static str, render: fn(&RealizedPatient) -> String) -> Pipeline<MeasureContext> {
    Pipeline::<MeasureContext>::new(name).transform(move |req, ctx| match &ctx.patient {
        Some(patient) => Response::observation(render(patient), req.state),
        None => missing(name, req),
    })
}

fn pulse(p: &RealizedPatient) -> String {
    format!(
        "The pulse is {:.0} beats per minute and {}.",
        p.heart_rate, p.pulse_rhythm
    )
}

fn respirations(p: &RealizedPatient) -> String {
    format!(
        "Respirations are {:.0} per minute, {} and {}.",
        p.respiratory_rate, p.respiratory_rhythm, p.respiratory_effort
    )
}

fn skin(p: &RealizedPatient) -> String {
    format!(
        "The skin is {}, {}, and {}.",
        p.skin_color, p.skin_temperature, p.skin_moisture
    )
}

fn pupils(p: &RealizedPatient) -> String {
    format!(
        "The pupils are {}, {}, and {}.",
        p.pupil_shape, p.pupil_equality, p.pupil_reactivity
    )
}

fn temperature(p: &RealizedPatient) -> String {
    format!("The patient's temperature is {:.1}°F.", p.core_temperature)
}

fn responsiveness(p: &RealizedPatient) -> String {
    format!("The patient is {}.", p.responsiveness)
}

fn circulation() -> Pipeline<MeasureContext> {
    Pipeline::<MeasureContext>::new("measure circulation")
        .enrich(|req, ctx| {
            if ctx.realized_part().is_some_and(|p| p.kind.circulation().is_none()) {
                return ControlFlow::Break(Response::invalid(
                    format!(
                        "There is no distal pulse to check on the {}.",
                        part_words(&ctx)
                    ),
                    req.state,
                ));
            }
            ControlFlow::Continue(ctx)
        })
        .transform(|req, ctx| {
            match ctx.realized_part().and_then(|p| p.kind.circulation()) {
                Some(quality) => Response::observation(
                    format!(
                        "The distal pulse in the {} is {quality}.",
                        part_words(&ctx)
                    ),
                    req.state,
                ),
                None => missing("measure circulation", req),
            }
        })
}

fn sensation() -> Pipeline<MeasureContext> {
    Pipeline::<MeasureContext>::new("measure sensation")
        .enrich(|req, ctx| {
            if ctx.realized_part().is_some_and(|p| p.kind.sensation().is_none()) {
                return ControlFlow::Break(Response::invalid(
                    format!(
                        "Sensation is checked on a hand or foot, not the {}.",
                        part_words(&ctx)
                    ),
                    req.state,
                ));
            }
            ControlFlow::Continue(ctx)
        })
        .transform(|req, ctx| {
            match ctx.realized_part().and_then(|p| p.kind.sensation()) {
                Some(finding) => Response::observation(
                    format!("Sensation in the {} is {finding}.", part_words(&ctx)),
                    req.state,
                ),
                None => missing("measure sensation", req),
            }
        })
}

fn motion() -> Pipeline<MeasureContext> {
    Pipeline::<MeasureContext>::new("measure motion").transform(|req, ctx| {
        match ctx.realized_part() {
            Some(part) => Response::observation(
                format!("Motion in the {} is {}.", part_words(&ctx), part.motion),
                req.state,
            ),
            None => missing("measure motion", req),
        }
    })
}

fn part_words(ctx: &MeasureContext) -> String {
    ctx.part.as_deref().map(humanize).unwrap_or_default()
}

fn missing(name: &'static str, req: &Request<'_>) -> Response {
    Response::unexpected(&EngineError::MissingContext(name), req.state)
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{near_state, run, state};
    use crate::response::ResultKind;

    #[test]
    fn vitals_reflect_active_ailments() {
        let s = near_state();
        assert_eq!(
            run("measure pulse", &s).narration,
            "The pulse is 100 beats per minute and regular."
        );
        insta::assert_snapshot!(
            run("measure respirations", &s).narration,
            @"Respirations are 20 per minute, regular and unlabored."
        );
        assert_eq!(run("measure skin", &s).narration, "The skin is pale, warm, and dry.");
        assert_eq!(
            run("measure pupils", &s).narration,
            "The pupils are round, equal, and reactive to light."
        );
        assert_eq!(
            run("measure temperature", &s).narration,
            "The patient's temperature is 98.6°F."
        );
    }

    #[test]
    fn most_vitals_need_contact() {
        let s = state();
        assert_eq!(run("measure pulse", &s).kind, ResultKind::GuardFailure);
        assert_eq!(run("measure respirations", &s).kind, ResultKind::Success);
        assert_eq!(run("measure responsiveness", &s).kind, ResultKind::Success);
    }

    #[test]
    fn limb_findings_need_a_body_part() {
        let s = near_state();
        assert_eq!(run("measure circulation", &s).kind, ResultKind::ParseFailure);
        assert_eq!(run("measure circulation tail", &s).kind, ResultKind::InvalidCommand);
        assert_eq!(
            run("measure circulation leftFoot", &s).narration,
            "The distal pulse in the left foot is weak."
        );
        assert_eq!(
            run("measure sensation leftfoot", &s).narration,
            "Sensation in the left foot is tingling."
        );
        assert_eq!(
            run("measure motion leftLeg", &s).narration,
            "Motion in the left leg is impaired."
        );
    }

    #[test]
    fn wrong_capability_tier_is_invalid() {
        let s = near_state();
        assert_eq!(run("measure circulation head", &s).kind, ResultKind::InvalidCommand);
        assert_eq!(run("measure sensation leftLeg", &s).kind, ResultKind::InvalidCommand);
        assert_eq!(run("measure motion head", &s).kind, ResultKind::Success);
    }

    #[test]
    fn unknown_measurement_is_invalid() {
        assert_eq!(run("measure mood", &near_state()).kind, ResultKind::InvalidCommand);
    }
}
