// forkful/src/flow/control.rs

//! Signals returned by step handlers and the outcome of a whole flow run.

/// What a step handler wants the flow to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  /// Run the remaining handlers of this step, then the next step.
  Continue,
  /// Stop here. No further handlers or steps run.
  Halt,
}

/// How a flow run ended when no handler failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  /// Every step that was not skipped ran to the end.
  Completed,
  /// A handler returned [`StepControl::Halt`].
  Halted,
}
