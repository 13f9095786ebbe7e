//! `instruct`: tell the patient what to do.

use medsim_core::command::InstructTarget;
use medsim_core::patient::Instructions;

use crate::error::EngineError;
use crate::handlers::guards::{can_speak, flow, object_target};
use crate::narrate::humanize;
use crate::pipeline::Pipeline;
use crate::response::Response;

/// Context for `instruct`.
#[derive(Debug, Default)]
pub struct InstructContext {
    target: Option<InstructTarget>,
}

fn flag(instructions: &mut Instructions, target: InstructTarget) -> &mut bool {
    match target {
        InstructTarget::DontMove => &mut instructions.dont_move,
        InstructTarget::AcceptCare => &mut instructions.accept_care,
        InstructTarget::Breathe => &mut instructions.breathe,
    }
}

fn is_given(instructions: Instructions, target: InstructTarget) -> bool {
    match target {
        InstructTarget::DontMove => instructions.dont_move,
        InstructTarget::AcceptCare => instructions.accept_care,
        InstructTarget::Breathe => instructions.breathe,
    }
}

fn narration(target: InstructTarget) -> &'static str {
    match target {
        InstructTarget::DontMove => {
            "You ask the patient to hold still. \"Okay, I won't move.\""
        }
        InstructTarget::AcceptCare => {
            "You introduce yourself and ask if you can help. \"Yes, please.\""
        }
        InstructTarget::Breathe => {
            "You coach the patient to take slow, deep breaths. Their breathing steadies."
        }
    }
}

/// Build the `instruct` pipeline.
pub fn pipeline() -> Pipeline<InstructContext> {
    Pipeline::<InstructContext>::new("instruct")
        .enrich(|req, mut ctx: InstructContext| {
            flow(
                object_target(req, "Instruct the patient to do what?", InstructTarget::parse, |t| {
                    format!("You can't instruct the patient to {}.", humanize(t))
                })
                .map(|t| {
                    ctx.target = Some(t);
                    ctx
                }),
            )
        })
        .guard_msg(can_speak, "The patient can't hear or respond to you.")
        .guard(
            |req, ctx| {
                ctx.target
                    .is_none_or(|t| !is_given(req.state.patient.instructions, t))
            },
            |_, _| "You have already told the patient that.".to_string(),
        )
        .transform(|req, ctx| {
            let Some(target) = ctx.target else {
                return Response::unexpected(&EngineError::MissingContext("instruct"), req.state);
            };
            let mut next = req.state.clone();
            *flag(&mut next.patient.instructions, target) = true;
            Response::success(narration(target), next)
        })
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{run, state};
    use crate::response::ResultKind;
    use medsim_core::Responsiveness;

    #[test]
    fn instruction_sets_its_flag_once() {
        let s = state();
        let r = run("instruct dontMove", &s);
        assert_eq!(r.kind, ResultKind::Success);
        assert!(r.state.patient.instructions.dont_move);
        assert!(!r.state.patient.instructions.breathe);
        assert!(!s.patient.instructions.dont_move);

        let again = run("instruct dontmove", &r.state);
        assert_eq!(again.kind, ResultKind::GuardFailure);
        assert_eq!(again.state, r.state);
    }

    #[test]
    fn each_instruction_has_its_own_flag() {
        let r = run("instruct acceptCare", &state());
        assert!(r.state.patient.instructions.accept_care);
        let r = run("instruct breathe", &r.state);
        assert!(r.state.patient.instructions.breathe);
        assert!(r.state.patient.instructions.accept_care);
    }

    #[test]
    fn unresponsive_patient_cannot_be_instructed() {
        let mut s = state();
        s.patient.responsiveness = Responsiveness::Verbal;
        let r = run("instruct breathe", &s);
        assert_eq!(r.kind, ResultKind::GuardFailure);
        assert_eq!(r.state, s);
    }

    #[test]
    fn unknown_instruction_is_invalid() {
        assert_eq!(run("instruct dance", &state()).kind, ResultKind::InvalidCommand);
        assert_eq!(run("instruct", &state()).kind, ResultKind::ParseFailure);
    }
}
