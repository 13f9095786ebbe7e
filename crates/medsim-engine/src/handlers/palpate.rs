//! `palpate`: feel a body part.

use std::ops::ControlFlow;

use medsim_core::{Object, Position};

use crate::handlers::guards::{NOT_NEAR, near};
use crate::narrate::{humanize, sentences};
use crate::pipeline::Pipeline;
use crate::realize::realize_part;
use crate::response::Response;

/// Parts that cannot be reached while the patient lies on them.
const POSTERIOR_PARTS: &[&str] = &["back", "spine"];

/// Context for `palpate`.
#[derive(Debug, Default)]
pub struct PalpateContext {
    part: String,
}

/// Build the `palpate` pipeline.
pub fn pipeline() -> Pipeline<PalpateContext> {
    Pipeline::<PalpateContext>::new("palpate")
        .guard_msg(near, NOT_NEAR)
        .enrich(|req, mut ctx: PalpateContext| match &req.command.object {
            Some(Object::BodyPart(name)) => {
                ctx.part = name.clone();
                ControlFlow::Continue(ctx)
            }
            Some(Object::Target(t)) if t == "spine" => {
                ctx.part = t.clone();
                ControlFlow::Continue(ctx)
            }
            None => ControlFlow::Break(Response::parse_failure("Palpate what?", req.state)),
            Some(other) => ControlFlow::Break(Response::invalid(
                format!("You can't palpate the {}.", humanize(other.token())),
                req.state,
            )),
        })
        .guard(
            |req, ctx| {
                req.state.patient.position != Position::Supine
                    || !POSTERIOR_PARTS
                        .iter()
                        .any(|p| p.eq_ignore_ascii_case(&ctx.part))
            },
            |_, ctx| {
                format!(
                    "You can't reach the patient's {} while they are lying on it.",
                    humanize(&ctx.part)
                )
            },
        )
        .transform(|req, ctx| {
            let patient = &req.state.patient;
            let found = patient.body_part(&ctx.part).or_else(|| {
                if ctx.part == "spine" {
                    patient.body_part("back")
                } else {
                    None
                }
            });
            let Some(part) = found else {
                return Response::invalid(
                    format!("The patient doesn't have a {}.", humanize(&ctx.part)),
                    req.state,
                );
            };
            let realized = realize_part(req.state, part);
            let normal = realized
                .effect_palpation
                .is_empty()
                .then_some("Everything feels normal.");
            let text = sentences(
                std::iter::once(format!("You palpate the {}.", humanize(&ctx.part)))
                    .chain(std::iter::once(realized.palpation))
                    .chain(realized.effect_palpation)
                    .chain(normal.map(String::from)),
            );
            Response::observation(text, req.state)
        })
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{near_state, run, state};
    use crate::response::ResultKind;
    use medsim_core::Position;

    #[test]
    fn palpation_needs_contact() {
        assert_eq!(run("palpate head", &state()).kind, ResultKind::GuardFailure);
    }

    #[test]
    fn injured_part_reports_ailment_findings() {
        let r = run("palpate leftLeg", &near_state());
        assert_eq!(
            r.narration,
            "You palpate the left leg. The leg is warm. There is point tenderness and crepitus over the mid-shin."
        );
    }

    #[test]
    fn healthy_part_feels_normal() {
        let r = run("palpate chest", &near_state());
        assert_eq!(
            r.narration,
            "You palpate the chest. The ribs feel stable. Everything feels normal."
        );
    }

    #[test]
    fn back_is_unreachable_while_supine() {
        let s = near_state();
        let r = run("palpate back", &s);
        assert_eq!(r.kind, ResultKind::GuardFailure);

        assert_eq!(run("palpate spine", &s).kind, ResultKind::GuardFailure);

        let mut sitting = s.clone();
        sitting.patient.position = Position::Sitting;
        assert_eq!(run("palpate back", &sitting).kind, ResultKind::Success);
        assert_eq!(
            run("palpate spine", &sitting).narration,
            "You palpate the spine. No step-offs along the spine. Everything feels normal."
        );
    }

    #[test]
    fn only_body_parts_can_be_palpated() {
        let s = near_state();
        assert_eq!(run("palpate", &s).kind, ResultKind::ParseFailure);
        assert_eq!(run("palpate patient", &s).kind, ResultKind::InvalidCommand);
        assert_eq!(run("palpate tail", &s).kind, ResultKind::InvalidCommand);
    }
}
