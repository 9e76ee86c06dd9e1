// forkful/src/flow/execution.rs

//! `Flow::run()`: walks the steps in order and drives each step's handlers.

use super::control::{FlowOutcome, StepControl};
use super::definition::{Flow, Phase};
use super::step::StepDef;
use super::SharedContext;
use crate::error::FlowError;
use tracing::{event, span, Instrument, Level};

impl<T, E> Flow<T, E>
where
  T: Send + Sync + 'static,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step against `ctx`.
  ///
  /// Within a step, `before` handlers run first, then `on`, then `after`. The
  /// first handler error aborts the run and is returned as is. A required step
  /// with no handlers at all fails with [`FlowError::HandlerMissing`].
  pub async fn run(&self, ctx: SharedContext<T>) -> Result<FlowOutcome, E> {
    let flow_span = span!(Level::INFO, "flow_run", flow = %self.name, num_steps = self.steps.len());
    self.run_steps(ctx).instrument(flow_span).await
  }

  async fn run_steps(&self, ctx: SharedContext<T>) -> Result<FlowOutcome, E> {
    event!(Level::DEBUG, "Flow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "flow_step",
        step_name = %step_def.name,
        step_index = step_idx,
        optional = step_def.optional
      );
      if self.run_step(step_def, &ctx).instrument(step_span).await? == StepControl::Halt {
        return Ok(FlowOutcome::Halted);
      }
    }

    event!(Level::DEBUG, "Flow execution completed.");
    Ok(FlowOutcome::Completed)
  }

  async fn run_step(&self, step_def: &StepDef<T>, ctx: &SharedContext<T>) -> Result<StepControl, E> {
    if let Some(skip_if) = &step_def.skip_if {
      if skip_if(ctx) {
        event!(Level::INFO, "Step skipped by its skip condition.");
        return Ok(StepControl::Continue);
      }
    }

    let handlers = match self.handlers.get(&step_def.name) {
      Some(handlers) if !handlers.is_empty() => handlers,
      _ if step_def.optional => {
        event!(Level::DEBUG, "Optional step has no handlers, skipping.");
        return Ok(StepControl::Continue);
      }
      _ => {
        event!(Level::ERROR, "Required step has no handlers.");
        return Err(E::from(FlowError::HandlerMissing {
          flow: self.name.clone(),
          step_name: step_def.name.clone(),
        }));
      }
    };

    for phase in [Phase::Before, Phase::On, Phase::After] {
      for (handler_idx, handler_fn) in handlers.phase(phase).iter().enumerate() {
        match handler_fn(ctx.clone()).await {
          Ok(StepControl::Continue) => {}
          Ok(StepControl::Halt) => {
            event!(Level::INFO, phase = phase.as_str(), handler_index = handler_idx, "Flow halted by handler.");
            return Ok(StepControl::Halt);
          }
          Err(e) => {
            event!(Level::ERROR, phase = phase.as_str(), handler_index = handler_idx, error = %e, "Step handler failed.");
            return Err(e);
          }
        }
      }
    }

    Ok(StepControl::Continue)
  }
}
