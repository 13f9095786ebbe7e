//! `wear`: put on protective gear from the inventory.

use crate::handlers::guards::{flow, object_token};
use crate::pipeline::Pipeline;
use crate::response::Response;

/// Context for `wear`.
#[derive(Debug, Default)]
pub struct WearContext {
    item: String,
}

/// Build the `wear` pipeline.
pub fn pipeline() -> Pipeline<WearContext> {
    Pipeline::<WearContext>::new("wear")
        .enrich(|req, mut ctx: WearContext| {
            flow(object_token(req, "Wear what?").map(|item| {
                ctx.item = item.to_string();
                ctx
            }))
        })
        .guard(
            |req, ctx| !req.state.player.wears(&ctx.item),
            |_, ctx| format!("You are already wearing {}.", ctx.item),
        )
        .guard(
            |req, ctx| req.state.player.carries(&ctx.item),
            |_, ctx| format!("You don't have any {}.", ctx.item),
        )
        .transform(|req, ctx| {
            let mut next = req.state.clone();
            next.player.put_on(&ctx.item);
            Response::success(format!("You put on the {}.", ctx.item), next)
        })
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{run, state};
    use crate::response::ResultKind;

    #[test]
    fn gloves_move_from_inventory_to_worn() {
        let s = state();
        let r = run("wear gloves", &s);
        assert_eq!(r.kind, ResultKind::Success);
        assert_eq!(r.narration, "You put on the gloves.");
        assert!(r.state.player.wears("gloves"));
        assert!(!r.state.player.carries("gloves"));
        assert!(s.player.carries("gloves"));
    }

    #[test]
    fn wearing_twice_fails() {
        let once = run("wear gloves", &state()).state;
        let twice = run("wear gloves", &once);
        assert_eq!(twice.kind, ResultKind::GuardFailure);
        assert_eq!(twice.narration, "You are already wearing gloves.");
        assert_eq!(twice.state, once);
    }

    #[test]
    fn missing_items_cannot_be_worn() {
        let r = run("wear goggles", &state());
        assert_eq!(r.kind, ResultKind::GuardFailure);
        assert_eq!(r.narration, "You don't have any goggles.");
        assert_eq!(run("wear", &state()).kind, ResultKind::ParseFailure);
    }
}
