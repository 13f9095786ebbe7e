//! `apply` and `perform`: record treatments against the ailments they address.
//!
//! Both verbs share one pipeline shape. The treatment key is looked up in the
//! verb's vocabulary; the candidate ailments are those affecting the named
//! body part (apply) or every ailment (perform). The key may not already be
//! recorded on any candidate, and at least one candidate must list it. When
//! none does, the scenario's global catalog may still accept it once.

use std::ops::ControlFlow;

use medsim_core::command::{ApplyTarget, PerformTarget};
use medsim_core::{Ailment, ScenarioState};

use crate::handlers::guards::{NOT_NEAR, flow, near, object_target};
use crate::narrate::humanize;
use crate::pipeline::{Pipeline, Request};
use crate::response::Response;

/// Context for `apply` and `perform`.
#[derive(Debug, Default)]
pub struct TreatmentContext {
    key: String,
    part: Option<String>,
    candidates: Vec<usize>,
    accepting: Vec<usize>,
    global: bool,
}

struct Vocabulary {
    name: &'static str,
    past: &'static str,
    prompt: &'static str,
    parse: fn(&str) -> Option<&'static str>,
    uses_part: bool,
    no_effect: fn(&TreatmentContext) -> String,
    done: fn(&TreatmentContext) -> String,
}

/// Build the `apply` pipeline.
pub fn apply() -> Pipeline<TreatmentContext> {
    build(Vocabulary {
        name: "apply",
        past: "applied",
        prompt: "Apply what?",
        parse: |t| ApplyTarget::parse(t).map(|a| a.name()),
        uses_part: true,
        no_effect: |ctx| match &ctx.part {
            Some(part) => format!(
                "Applying a {} to the {} doesn't seem to help.",
                ctx.key,
                humanize(part)
            ),
            None => format!("Applying a {} doesn't seem to help.", ctx.key),
        },
        done: |ctx| match &ctx.part {
            Some(part) => format!("You apply a {} to the {}.", ctx.key, humanize(part)),
            None => format!("You apply a {}.", ctx.key),
        },
    })
}

/// Build the `perform` pipeline.
pub fn perform() -> Pipeline<TreatmentContext> {
    build(Vocabulary {
        name: "perform",
        past: "performed",
        prompt: "Perform what?",
        parse: |t| PerformTarget::parse(t).map(|p| p.name()),
        uses_part: false,
        no_effect: |ctx| format!("The patient doesn't need {}.", humanize(&ctx.key)),
        done: |ctx| format!("You perform {}.", humanize(&ctx.key)),
    })
}

fn build(vocab: Vocabulary) -> Pipeline<TreatmentContext> {
    let Vocabulary {
        name,
        past,
        prompt,
        parse,
        uses_part,
        no_effect,
        done,
    } = vocab;

    Pipeline::<TreatmentContext>::new(name)
        .guard_msg(near, NOT_NEAR)
        .enrich(move |req, mut ctx: TreatmentContext| {
            flow(
                object_target(req, prompt, parse, |t| {
                    format!("You can't {name} {}.", humanize(t))
                })
                .map(|key| {
                    ctx.key = key.to_string();
                    ctx
                }),
            )
        })
        .enrich(move |req, mut ctx| {
            if !uses_part {
                return ControlFlow::Continue(ctx);
            }
            match req.command.modifier(0) {
                None => ControlFlow::Continue(ctx),
                Some(token) => match req.state.patient.body_part(token) {
                    Some(part) => {
                        ctx.part = Some(part.name.clone());
                        ControlFlow::Continue(ctx)
                    }
                    None => ControlFlow::Break(Response::invalid(
                        format!("The patient doesn't have a {}.", humanize(token)),
                        req.state,
                    )),
                },
            }
        })
        .enrich(|req, mut ctx| {
            let ailments = &req.state.patient.ailments;
            ctx.candidates = match &ctx.part {
                Some(part) => indexes(ailments, |a| a.affects_part(part)),
                None => (0..ailments.len()).collect(),
            };
            ControlFlow::Continue(ctx)
        })
        .guard(
            |req, ctx| !already_applied(req.state, ctx),
            move |_, ctx| format!("You have already {past} the {}.", humanize(&ctx.key)),
        )
        .enrich(move |req, mut ctx| {
            let ailments = &req.state.patient.ailments;
            ctx.accepting = ctx
                .candidates
                .iter()
                .copied()
                .filter(|&i| ailments[i].accepts(&ctx.key))
                .collect();
            if ctx.accepting.is_empty() {
                if req.state.treatments.get(&ctx.key).is_none() {
                    return ControlFlow::Break(Response::guard_failure(no_effect(&ctx), req.state));
                }
                ctx.global = true;
            }
            ControlFlow::Continue(ctx)
        })
        .transform(move |req, ctx| {
            let mut next = req.state.clone();
            let narration = if ctx.global {
                next.treatments.applied.push(ctx.key.clone());
                next.treatments.get(&ctx.key).and_then(|t| t.narration.clone())
            } else {
                for &i in &ctx.accepting {
                    next.patient.ailments[i].applied_treatments.push(ctx.key.clone());
                }
                first_narration(req, &ctx)
            };
            Response::success(narration.unwrap_or_else(|| done(&ctx)), next)
        })
}

fn indexes(ailments: &[Ailment], keep: impl Fn(&Ailment) -> bool) -> Vec<usize> {
    ailments
        .iter()
        .enumerate()
        .filter(|(_, a)| keep(a))
        .map(|(i, _)| i)
        .collect()
}

fn already_applied(state: &ScenarioState, ctx: &TreatmentContext) -> bool {
    state.treatments.has_applied(&ctx.key)
        || ctx
            .candidates
            .iter()
            .any(|&i| state.patient.ailments[i].has_applied(&ctx.key))
}

fn first_narration(req: &Request<'_>, ctx: &TreatmentContext) -> Option<String> {
    ctx.accepting.iter().find_map(|&i| {
        req.state.patient.ailments[i]
            .treatments
            .iter()
            .find(|t| t.is_keyed(&ctx.key))
            .and_then(|t| t.narration.clone())
    })
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{near_state, run, state};
    use crate::response::ResultKind;

    fn applied(state: &medsim_core::ScenarioState, ailment: &str) -> Vec<String> {
        state
            .patient
            .ailments
            .iter()
            .find(|a| a.name == ailment)
            .map(|a| a.applied_treatments.clone())
            .unwrap_or_default()
    }

    #[test]
    fn splint_is_recorded_on_the_fracture() {
        let s = near_state();
        let r = run("apply splint leftLeg", &s);
        assert_eq!(r.kind, ResultKind::Success);
        assert_eq!(
            r.narration,
            "You splint the leg, padding the voids. The patient sighs with relief."
        );
        assert_eq!(applied(&r.state, "tibia fracture"), vec!["splint".to_string()]);
        assert!(applied(&s, "tibia fracture").is_empty());
    }

    #[test]
    fn treatment_cannot_be_repeated() {
        let once = run("apply splint leftLeg", &near_state()).state;
        let twice = run("apply splint leftLeg", &once);
        assert_eq!(twice.kind, ResultKind::GuardFailure);
        assert_eq!(twice.state, once);
    }

    #[test]
    fn ailment_must_accept_the_treatment() {
        let s = near_state();
        let r = run("apply tourniquet head", &s);
        assert_eq!(r.kind, ResultKind::GuardFailure);
        assert_eq!(r.state, s);
        assert_eq!(r.narration, "Applying a tourniquet to the head doesn't seem to help.");
    }

    #[test]
    fn treatment_without_part_considers_every_ailment() {
        let r = run("apply dressing", &near_state());
        assert_eq!(r.kind, ResultKind::Success);
        assert_eq!(applied(&r.state, "scalp laceration"), vec!["dressing".to_string()]);
        assert_eq!(r.narration, "You apply a dressing.");
    }

    #[test]
    fn global_catalog_accepts_once() {
        let r = run("apply blanket", &near_state());
        assert_eq!(r.kind, ResultKind::Success);
        assert_eq!(r.state.treatments.applied, vec!["blanket".to_string()]);
        assert_eq!(run("apply blanket", &r.state).kind, ResultKind::GuardFailure);
    }

    #[test]
    fn treatment_needs_contact_and_vocabulary() {
        assert_eq!(run("apply splint leftLeg", &state()).kind, ResultKind::GuardFailure);
        assert_eq!(run("apply glue leftLeg", &near_state()).kind, ResultKind::InvalidCommand);
        assert_eq!(run("apply splint tail", &near_state()).kind, ResultKind::InvalidCommand);
        assert_eq!(run("apply", &near_state()).kind, ResultKind::ParseFailure);
    }

    #[test]
    fn perform_checks_every_ailment() {
        let r = run("perform cpr", &near_state());
        assert_eq!(r.kind, ResultKind::GuardFailure);
        assert_eq!(r.narration, "The patient doesn't need cpr.");
        assert_eq!(run("perform juggling", &near_state()).kind, ResultKind::InvalidCommand);
    }
}
