//! `control`: take manual spine stabilization.

use medsim_core::command::ControlTarget;

use crate::error::EngineError;
use crate::handlers::guards::{NOT_NEAR, flow, near, object_target};
use crate::narrate::humanize;
use crate::pipeline::Pipeline;
use crate::response::Response;

/// Context for `control`.
#[derive(Debug, Default)]
pub struct ControlContext {
    target: Option<ControlTarget>,
}

/// Build the `control` pipeline.
pub fn pipeline() -> Pipeline<ControlContext> {
    Pipeline::<ControlContext>::new("control")
        .enrich(|req, mut ctx: ControlContext| {
            flow(
                object_target(req, "Control what?", ControlTarget::parse, |t| {
                    format!("You can't take control of the {}.", humanize(t))
                })
                .map(|t| {
                    ctx.target = Some(t);
                    ctx
                }),
            )
        })
        .guard_msg(near, NOT_NEAR)
        .guard_msg(
            |req, _| !req.state.patient.spine_controlled,
            "You are already holding the head and neck still.",
        )
        .transform(|req, ctx| match ctx.target {
            Some(ControlTarget::Spine) => {
                let mut next = req.state.clone();
                next.patient.spine_controlled = true;
                Response::success(
                    "You kneel at the patient's head and hold it in line with the body.",
                    next,
                )
            }
            None => Response::unexpected(&EngineError::MissingContext("control"), req.state),
        })
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{near_state, run, state};
    use crate::response::ResultKind;

    #[test]
    fn spine_control_toggles_once() {
        let s = near_state();
        let held = run("control spine", &s);
        assert_eq!(held.kind, ResultKind::Success);
        assert!(held.state.patient.spine_controlled);
        assert!(!s.patient.spine_controlled);

        let again = run("control spine", &held.state);
        assert_eq!(again.kind, ResultKind::GuardFailure);
        assert_eq!(again.state, held.state);
    }

    #[test]
    fn control_needs_contact_and_a_target() {
        assert_eq!(run("control spine", &state()).kind, ResultKind::GuardFailure);
        assert_eq!(run("control", &near_state()).kind, ResultKind::ParseFailure);
        assert_eq!(run("control bleeding", &near_state()).kind, ResultKind::InvalidCommand);
    }
}
