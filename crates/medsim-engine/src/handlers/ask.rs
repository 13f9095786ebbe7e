//! `ask`: history taking, gated by the patient's responsiveness.

use medsim_core::command::QuestionTarget;

use crate::error::EngineError;
use crate::handlers::guards::{answer_threshold, can_speak, flow, object_target};
use crate::narrate::{humanize, list, quote};
use crate::pipeline::{Pipeline, Request};
use crate::response::Response;

/// Context for `ask`.
#[derive(Debug, Default)]
pub struct AskContext {
    question: Option<QuestionTarget>,
}

/// Build the `ask` pipeline.
pub fn pipeline() -> Pipeline<AskContext> {
    Pipeline::<AskContext>::new("ask")
        .enrich(|req, mut ctx: AskContext| {
            flow(
                object_target(req, "Ask the patient about what?", QuestionTarget::parse, |t| {
                    format!("You can't think of a way to ask about {}.", humanize(t))
                })
                .map(|q| {
                    ctx.question = Some(q);
                    ctx
                }),
            )
        })
        .guard_msg(
            can_speak,
            "The patient is knocked out and can't answer you.",
        )
        .guard_msg(
            |req, ctx| {
                ctx.question.is_some_and(|q| {
                    req.state.patient.responsiveness >= answer_threshold(q.category())
                })
            },
            "\"I... I don't know.\"",
        )
        .transform(|req, ctx| match ctx.question.map(|q| answer(req, q)) {
            Some(Ok(line)) => Response::observation(line, req.state),
            Some(Err(err)) => Response::unexpected(&err, req.state),
            None => Response::unexpected(&EngineError::MissingContext("ask"), req.state),
        })
}

fn answer(req: &Request<'_>, question: QuestionTarget) -> Result<String, EngineError> {
    let patient = &req.state.patient;
    let history = &patient.history;
    let line = match question {
        QuestionTarget::Name => quote(&format!("My name is {}.", patient.name)),
        QuestionTarget::Age => quote(&format!("I'm {}.", patient.age)),
        QuestionTarget::Time => "The patient tells you the day and the time of day correctly.".into(),
        QuestionTarget::Location => "The patient knows where they are.".into(),
        QuestionTarget::Events => quote(&history.events),
        QuestionTarget::Allergies => quote(&history.allergies),
        QuestionTarget::Medications => quote(&history.medications),
        QuestionTarget::Intake => quote(&history.last_intake),
        QuestionTarget::Output => quote(&history.last_output),
        QuestionTarget::History => {
            let conditions = history.conditions.present();
            if conditions.is_empty() {
                quote("Nothing that I know of.")
            } else {
                quote(&format!("I have {}.", list(&conditions)))
            }
        }
        QuestionTarget::Complaint
        | QuestionTarget::Onset
        | QuestionTarget::Provocation
        | QuestionTarget::Quality
        | QuestionTarget::Radiation
        | QuestionTarget::Severity
        | QuestionTarget::Duration => {
            let narrative = &patient.chief_complaint()?.narrative;
            quote(match question {
                QuestionTarget::Onset => &narrative.onset,
                QuestionTarget::Provocation => &narrative.provocation,
                QuestionTarget::Quality => &narrative.quality,
                QuestionTarget::Radiation => &narrative.radiation,
                QuestionTarget::Severity => &narrative.severity,
                QuestionTarget::Duration => &narrative.duration,
                _ => &narrative.complaint,
            })
        }
    };
    Ok(line)
}
