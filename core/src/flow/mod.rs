// forkful/src/flow/mod.rs

//! A small async step runner.
//!
//! A [`Flow`] is an ordered list of named steps. Each step owns `before`, `on`
//! and `after` handlers that receive a clone of one [`SharedContext`]. Handlers
//! either continue, halt the flow, or fail it with the flow's error type.
//!
//! ```ignore
//! let mut flow = Flow::<Ctx, MyError>::new("greet", &[("hello", false, None)]);
//! flow.on("hello", |ctx: SharedContext<Ctx>| async move {
//!   ctx.write().greeted = true;
//!   Ok::<_, MyError>(StepControl::Continue)
//! })?;
//! flow.run(SharedContext::new(Ctx::default())).await?;
//! ```

pub mod context;
pub mod control;
pub mod definition;
mod execution;
pub mod step;

pub use context::SharedContext;
pub use control::{FlowOutcome, StepControl};
pub use definition::{Flow, StepFuture, StepHandler};
pub use step::{SkipCondition, StepDef};
