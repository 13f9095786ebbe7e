//! `remove`: expose a covered body part, or release spine control.

use std::collections::HashMap;
use std::ops::ControlFlow;

use medsim_core::command::RemoveTarget;
use medsim_core::{Object, Obstruction};

use crate::handlers::guards::{NOT_NEAR, near};
use crate::narrate::{humanize, sentences};
use crate::pipeline::Pipeline;
use crate::realize::realize_part;
use crate::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
enum Removal {
    #[default]
    Clothing,
    Spine,
}

/// Context for `remove`.
#[derive(Debug, Default)]
pub struct RemoveContext {
    removal: Removal,
    part: String,
}

/// Build the `remove` pipeline.
pub fn pipeline() -> Pipeline<RemoveContext> {
    let table = HashMap::from([(Removal::Clothing, clothing()), (Removal::Spine, spine())]);

    Pipeline::<RemoveContext>::new("remove")
        .enrich(|req, mut ctx: RemoveContext| match &req.command.object {
            Some(Object::BodyPart(name)) => {
                ctx.removal = Removal::Clothing;
                ctx.part = name.clone();
                ControlFlow::Continue(ctx)
            }
            Some(Object::Target(t)) if RemoveTarget::parse(t) == Some(RemoveTarget::Spine) => {
                ctx.removal = Removal::Spine;
                ControlFlow::Continue(ctx)
            }
            None => ControlFlow::Break(Response::parse_failure("Remove what?", req.state)),
            Some(other) => ControlFlow::Break(Response::invalid(
                format!("You can't remove the {}.", humanize(other.token())),
                req.state,
            )),
        })
        .dispatch(table, |ctx| Some(ctx.removal))
}

fn clothing() -> Pipeline<RemoveContext> {
    Pipeline::<RemoveContext>::new("remove clothing")
        .guard_msg(near, NOT_NEAR)
        .guard(
            |req, ctx| {
                req.state
                    .patient
                    .body_part(&ctx.part)
                    .is_some_and(|p| p.is_obstructed())
            },
            |_, ctx| format!("Nothing is covering the {}.", humanize(&ctx.part)),
        )
        .transform(|req, ctx| {
            let mut next = req.state.clone();
            let Some(part) = next.patient.body_part_mut(&ctx.part) else {
                return Response::invalid(
                    format!("The patient doesn't have a {}.", humanize(&ctx.part)),
                    req.state,
                );
            };
            part.obstruction = Obstruction::Unobstructed;
            let part = part.clone();
            let realized = realize_part(&next, &part);
            let text = sentences(
                std::iter::once(format!("You expose the {}.", humanize(&part.name)))
                    .chain(std::iter::once(realized.description))
                    .chain(realized.findings),
            );
            Response::success(text, next)
        })
}

fn spine() -> Pipeline<RemoveContext> {
    Pipeline::<RemoveContext>::new("remove spine")
        .guard_msg(
            |req, _| req.state.patient.spine_controlled,
            "You aren't holding manual stabilization.",
        )
        .transform(|req, _| {
            let mut next = req.state.clone();
            next.patient.spine_controlled = false;
            Response::success("You release manual stabilization of the head and neck.", next)
        })
}
