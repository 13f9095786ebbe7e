//! `move`: approach or step back from the patient, or reposition them.

use std::collections::HashMap;
use std::ops::ControlFlow;

use medsim_core::command::MoveTarget;
use medsim_core::{Distance, Object, Position};

use crate::error::EngineError;
use crate::handlers::guards::{NOT_NEAR, near};
use crate::narrate::humanize;
use crate::parser::require_modifier;
use crate::pipeline::Pipeline;
use crate::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Motion {
    In,
    Out,
    Reposition,
}

/// Context for `move`.
#[derive(Debug, Default)]
pub struct MoveContext {
    target: Option<MoveTarget>,
}

/// Build the `move` pipeline.
pub fn pipeline() -> Pipeline<MoveContext> {
    let table = HashMap::from([
        (Motion::In, approach()),
        (Motion::Out, step_back()),
        (Motion::Reposition, reposition()),
    ]);

    Pipeline::<MoveContext>::new("move")
        .enrich(|req, mut ctx: MoveContext| {
            let target = match &req.command.object {
                None => {
                    return ControlFlow::Break(Response::parse_failure("Move where?", req.state));
                }
                Some(Object::Patient) => match require_modifier(req.command, 0, "position") {
                    Ok(token) => Position::parse(token).map(MoveTarget::Position).ok_or(token),
                    Err(err) => {
                        return ControlFlow::Break(Response::parse_failure(
                            err.to_string(),
                            req.state,
                        ));
                    }
                },
                Some(other) => MoveTarget::parse(other.token()).ok_or(other.token()),
            };
            match target {
                Ok(target) => {
                    ctx.target = Some(target);
                    ControlFlow::Continue(ctx)
                }
                Err(token) => ControlFlow::Break(Response::invalid(
                    format!("You can't move {}.", humanize(token)),
                    req.state,
                )),
            }
        })
        .dispatch(table, |ctx| {
            ctx.target.map(|t| match t {
                MoveTarget::In => Motion::In,
                MoveTarget::Out => Motion::Out,
                MoveTarget::Position(_) => Motion::Reposition,
            })
        })
}

fn approach() -> Pipeline<MoveContext> {
    Pipeline::<MoveContext>::new("move in")
        .guard_msg(
            |req, _| req.state.player.distance == Distance::Far,
            "You are already beside the patient.",
        )
        .transform(|req, _| {
            let mut next = req.state.clone();
            next.player.distance = Distance::Near;
            Response::success("You move in and kneel beside the patient.", next)
        })
}

fn step_back() -> Pipeline<MoveContext> {
    Pipeline::<MoveContext>::new("move out")
        .guard_msg(near, "You are already standing back from the patient.")
        .transform(|req, _| {
            let mut next = req.state.clone();
            next.player.distance = Distance::Far;
            Response::success("You step back from the patient.", next)
        })
}

fn reposition() -> Pipeline<MoveContext> {
    Pipeline::<MoveContext>::new("move position")
        .guard_msg(near, NOT_NEAR)
        .guard(
            |req, ctx| ctx.target != Some(MoveTarget::Position(req.state.patient.position)),
            |req, _| format!("The patient is already {}.", req.state.patient.position.describe()),
        )
        .transform(|req, ctx| {
            let Some(MoveTarget::Position(position)) = ctx.target else {
                return Response::unexpected(&EngineError::MissingContext("move position"), req.state);
            };
            let mut next = req.state.clone();
            next.patient.position = position;
            Response::success(
                format!("You help the patient move. They are now {}.", position.describe()),
                next,
            )
        })
}
