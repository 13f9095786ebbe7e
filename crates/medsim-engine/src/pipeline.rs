//! Guard / enrich / transform pipelines.
//!
//! A pipeline is an ordered list of [`Stage`]s sharing one context value that
//! grows as it moves through the chain. Each stage either passes the context
//! on or stops the chain with a terminal [`Response`]. Guards check a
//! predicate and fail with an in-character message. Enrichers add to the
//! context or short-circuit when their precondition fails. Transforms
//! produce the new state and the final narration.
//!
//! Running off the end of the chain without a terminal response is a
//! programming error and yields `unexpected_error`.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::ControlFlow;

use medsim_core::{Command, ScenarioState};

use crate::error::EngineError;
use crate::response::Response;

/// The immutable inputs every stage sees.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    /// The resolved command.
    pub command: &'a Command,
    /// The state before the command.
    pub state: &'a ScenarioState,
}

/// Continue with the context, or stop with a response.
pub type Flow<C> = ControlFlow<Response, C>;

type Check<C> = Box<dyn Fn(&Request<'_>, &C) -> bool + Send + Sync>;
type Message<C> = Box<dyn Fn(&Request<'_>, &C) -> String + Send + Sync>;
type Step<C> = Box<dyn Fn(&Request<'_>, C) -> Flow<C> + Send + Sync>;
type Finish<C> = Box<dyn Fn(&Request<'_>, C) -> Response + Send + Sync>;

/// One link of a pipeline.
pub enum Stage<C> {
    /// Stop with a guard failure when the check is false.
    Guard {
        /// The precondition.
        check: Check<C>,
        /// Narration when the precondition fails.
        failure: Message<C>,
    },
    /// Extend the context or short-circuit.
    Enrich(Step<C>),
    /// Produce the final response.
    Transform(Finish<C>),
}

impl<C> Stage<C> {
    fn run(&self, request: &Request<'_>, ctx: C) -> Flow<C> {
        match self {
            Self::Guard { check, failure } => {
                if check(request, &ctx) {
                    ControlFlow::Continue(ctx)
                } else {
                    ControlFlow::Break(Response::guard_failure(
                        failure(request, &ctx),
                        request.state,
                    ))
                }
            }
            Self::Enrich(step) => step(request, ctx),
            Self::Transform(finish) => ControlFlow::Break(finish(request, ctx)),
        }
    }
}

/// A named, ordered chain of stages.
pub struct Pipeline<C> {
    name: &'static str,
    stages: Vec<Stage<C>>,
}

impl<C: 'static> Pipeline<C> {
    /// An empty pipeline.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            stages: Vec::new(),
        }
    }

    /// The pipeline's name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Append a guard with a computed failure message.
    pub fn guard(
        mut self,
        check: impl Fn(&Request<'_>, &C) -> bool + Send + Sync + 'static,
        failure: impl Fn(&Request<'_>, &C) -> String + Send + Sync + 'static,
    ) -> Self {
        self.stages.push(Stage::Guard {
            check: Box::new(check),
            failure: Box::new(failure),
        });
        self
    }

    /// Append a guard with a fixed failure message.
    pub fn guard_msg(
        self,
        check: impl Fn(&Request<'_>, &C) -> bool + Send + Sync + 'static,
        message: &'static str,
    ) -> Self {
        self.guard(check, move |_, _| message.to_string())
    }

    /// Append an enricher.
    pub fn enrich(
        mut self,
        step: impl Fn(&Request<'_>, C) -> Flow<C> + Send + Sync + 'static,
    ) -> Self {
        self.stages.push(Stage::Enrich(Box::new(step)));
        self
    }

    /// Append the transform.
    pub fn transform(
        mut self,
        finish: impl Fn(&Request<'_>, C) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.stages.push(Stage::Transform(Box::new(finish)));
        self
    }

    /// Hand the context to a nested pipeline chosen by `select`.
    ///
    /// A selector that yields no key, or a key missing from the table, is a
    /// wiring bug and produces `unexpected_error`.
    pub fn dispatch<K>(
        self,
        table: HashMap<K, Pipeline<C>>,
        select: impl Fn(&C) -> Option<K> + Send + Sync + 'static,
    ) -> Self
    where
        K: Eq + Hash + Send + Sync + 'static,
    {
        let name = self.name;
        self.enrich(move |request, ctx| {
            match select(&ctx).and_then(|key| table.get(&key)) {
                Some(nested) => ControlFlow::Break(nested.run(request, ctx)),
                None => ControlFlow::Break(Response::unexpected(
                    &EngineError::MissingContext(name),
                    request.state,
                )),
            }
        })
    }

    /// Run the chain left to right starting from `ctx`.
    pub fn run(&self, request: &Request<'_>, ctx: C) -> Response {
        match self
            .stages
            .iter()
            .try_fold(ctx, |ctx, stage| stage.run(request, ctx))
        {
            ControlFlow::Break(response) => response,
            ControlFlow::Continue(_) => Response::unexpected(
                &EngineError::IncompletePipeline(self.name),
                request.state,
            ),
        }
    }
}

/// Something that turns a request into a response.
pub trait Handler: Send + Sync {
    /// Execute the request.
    fn handle(&self, request: &Request<'_>) -> Response;
}

impl<C: Default + 'static> Handler for Pipeline<C> {
    fn handle(&self, request: &Request<'_>) -> Response {
        self.run(request, C::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResultKind;
    use medsim_core::sample::fall_from_ledge;
    use medsim_core::{Object, Verb};

    #[derive(Debug, Default)]
    struct Ctx {
        seen: Vec<&'static str>,
    }

    fn fixture() -> (Command, ScenarioState) {
        (
            Command::new(Verb::Look).with_object(Object::Patient),
            fall_from_ledge().initial_state,
        )
    }

    #[test]
    fn stages_run_in_order() {
        let (command, state) = fixture();
        let request = Request {
            command: &command,
            state: &state,
        };
        let pipeline = Pipeline::<Ctx>::new("order")
            .enrich(|_, mut ctx| {
                ctx.seen.push("first");
                ControlFlow::Continue(ctx)
            })
            .guard_msg(|_, ctx| ctx.seen == ["first"], "out of order")
            .enrich(|_, mut ctx| {
                ctx.seen.push("second");
                ControlFlow::Continue(ctx)
            })
            .transform(|req, ctx| Response::observation(ctx.seen.join(","), req.state));

        let response = pipeline.handle(&request);
        assert_eq!(response.kind, ResultKind::Success);
        assert_eq!(response.narration, "first,second");
    }

    #[test]
    fn failing_guard_stops_the_chain() {
        let (command, state) = fixture();
        let request = Request {
            command: &command,
            state: &state,
        };
        let pipeline = Pipeline::<Ctx>::new("guarded")
            .guard_msg(|_, _| false, "Not now.")
            .transform(|_, _| panic!("transform must not run"));

        let response = pipeline.handle(&request);
        assert_eq!(response.kind, ResultKind::GuardFailure);
        assert_eq!(response.narration, "Not now.");
        assert_eq!(response.state, state);
    }

    #[test]
    fn enrich_can_short_circuit() {
        let (command, state) = fixture();
        let request = Request {
            command: &command,
            state: &state,
        };
        let pipeline = Pipeline::<Ctx>::new("short")
            .enrich(|req, _| ControlFlow::Break(Response::invalid("Nope.", req.state)))
            .transform(|_, _| panic!("transform must not run"));

        assert_eq!(pipeline.handle(&request).kind, ResultKind::InvalidCommand);
    }

    #[test]
    fn running_off_the_end_is_unexpected() {
        let (command, state) = fixture();
        let request = Request {
            command: &command,
            state: &state,
        };
        let pipeline = Pipeline::<Ctx>::new("open").guard_msg(|_, _| true, "unused");

        let response = pipeline.handle(&request);
        assert_eq!(response.kind, ResultKind::UnexpectedError);
        assert_eq!(response.state, state);
    }

    #[test]
    fn dispatch_selects_nested_pipeline() {
        let (command, state) = fixture();
        let request = Request {
            command: &command,
            state: &state,
        };
        let table = HashMap::from([
            (
                "a",
                Pipeline::<Ctx>::new("a").transform(|req, _| Response::observation("took a", req.state)),
            ),
            (
                "b",
                Pipeline::<Ctx>::new("b").transform(|req, _| Response::observation("took b", req.state)),
            ),
        ]);
        let pipeline = Pipeline::<Ctx>::new("branch").dispatch(table, |_| Some("b"));
        assert_eq!(pipeline.handle(&request).narration, "took b");

        let missing = Pipeline::<Ctx>::new("branch").dispatch(HashMap::<&str, _>::new(), |_| Some("z"));
        assert_eq!(missing.handle(&request).kind, ResultKind::UnexpectedError);
    }
}
