// forkful/src/flow/definition.rs

//! The `Flow<T, E>` type and the methods used to assemble one.

use super::control::StepControl;
use super::step::{SkipCondition, StepDef};
use super::SharedContext;
use crate::error::FlowError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// Future returned by a boxed step handler.
pub type StepFuture<E> = Pin<Box<dyn Future<Output = Result<StepControl, E>> + Send>>;

/// A type-erased async step handler.
///
/// Handlers receive a clone of the flow's [`SharedContext`] and must release any
/// lock guard before awaiting.
pub type StepHandler<T, E> = Box<dyn Fn(SharedContext<T>) -> StepFuture<E> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
  Before,
  On,
  After,
}

impl Phase {
  pub(crate) fn as_str(self) -> &'static str {
    match self {
      Phase::Before => "before",
      Phase::On => "on",
      Phase::After => "after",
    }
  }
}

pub(crate) struct StepHandlers<T: Send + Sync + 'static, E> {
  pub(crate) before: Vec<StepHandler<T, E>>,
  pub(crate) on: Vec<StepHandler<T, E>>,
  pub(crate) after: Vec<StepHandler<T, E>>,
}

impl<T: Send + Sync + 'static, E> Default for StepHandlers<T, E> {
  fn default() -> Self {
    Self {
      before: Vec::new(),
      on: Vec::new(),
      after: Vec::new(),
    }
  }
}

impl<T: Send + Sync + 'static, E> StepHandlers<T, E> {
  pub(crate) fn phase(&self, phase: Phase) -> &[StepHandler<T, E>] {
    match phase {
      Phase::Before => &self.before,
      Phase::On => &self.on,
      Phase::After => &self.after,
    }
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.before.is_empty() && self.on.is_empty() && self.after.is_empty()
  }
}

/// An ordered list of named async steps run against one shared context.
///
/// `E` is the error type every handler resolves to. It must absorb [`FlowError`]
/// so the runner can report structural problems (e.g. a required step with no
/// handler) through the same channel.
pub struct Flow<T, E>
where
  T: Send + Sync + 'static,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef<T>>,
  pub(crate) handlers: HashMap<String, StepHandlers<T, E>>,
}

impl<T, E> Flow<T, E>
where
  T: Send + Sync + 'static,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Declares a flow from `(step name, optional, skip condition)` triples.
  pub fn new(name: impl Into<String>, step_defs: &[(&str, bool, Option<SkipCondition<T>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(step_name, optional, skip_if)| StepDef {
        name: (*step_name).to_string(),
        optional: *optional,
        skip_if: skip_if.clone(),
      })
      .collect();

    Self {
      name: name.into(),
      steps,
      handlers: HashMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  fn ensure_step_exists(&self, step_name: &str) -> Result<(), FlowError> {
    if self.steps.iter().any(|s| s.name == step_name) {
      Ok(())
    } else {
      Err(FlowError::StepNotFound {
        flow: self.name.clone(),
        step_name: step_name.to_string(),
      })
    }
  }

  fn register<F, Fut, UserErr>(&mut self, phase: Phase, step_name: &str, handler_fn: F) -> Result<&mut Self, FlowError>
  where
    F: Fn(SharedContext<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
    UserErr: Into<E> + 'static,
  {
    self.ensure_step_exists(step_name)?;
    let boxed: StepHandler<T, E> = Box::new(move |ctx: SharedContext<T>| -> StepFuture<E> {
      let fut = handler_fn(ctx);
      Box::pin(async move { fut.await.map_err(Into::into) })
    });
    let entry = self.handlers.entry(step_name.to_string()).or_default();
    match phase {
      Phase::Before => entry.before.push(boxed),
      Phase::On => entry.on.push(boxed),
      Phase::After => entry.after.push(boxed),
    }
    tracing::trace!(flow = %self.name, step = step_name, phase = phase.as_str(), "Step handler registered.");
    Ok(self)
  }

  /// Adds a handler that runs before the step's main handlers.
  pub fn before<F, Fut, UserErr>(&mut self, step_name: &str, handler_fn: F) -> Result<&mut Self, FlowError>
  where
    F: Fn(SharedContext<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
    UserErr: Into<E> + 'static,
  {
    self.register(Phase::Before, step_name, handler_fn)
  }

  /// Adds one of the step's main handlers.
  pub fn on<F, Fut, UserErr>(&mut self, step_name: &str, handler_fn: F) -> Result<&mut Self, FlowError>
  where
    F: Fn(SharedContext<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
    UserErr: Into<E> + 'static,
  {
    self.register(Phase::On, step_name, handler_fn)
  }

  /// Adds a handler that runs after the step's main handlers.
  pub fn after<F, Fut, UserErr>(&mut self, step_name: &str, handler_fn: F) -> Result<&mut Self, FlowError>
  where
    F: Fn(SharedContext<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
    UserErr: Into<E> + 'static,
  {
    self.register(Phase::After, step_name, handler_fn)
  }

  pub fn insert_after_step(
    &mut self,
    existing_step_name: &str,
    new_step_name: &str,
    optional: bool,
    skip_if: Option<SkipCondition<T>>,
  ) -> Result<&mut Self, FlowError> {
    if self.steps.iter().any(|s| s.name == new_step_name) {
      return Err(FlowError::DuplicateStep {
        flow: self.name.clone(),
        step_name: new_step_name.to_string(),
      });
    }
    let idx = self
      .steps
      .iter()
      .position(|s| s.name == existing_step_name)
      .ok_or_else(|| FlowError::StepNotFound {
        flow: self.name.clone(),
        step_name: existing_step_name.to_string(),
      })?;
    self.steps.insert(
      idx + 1,
      StepDef {
        name: new_step_name.to_string(),
        optional,
        skip_if,
      },
    );
    Ok(self)
  }

  /// Drops a step and its handlers. Unknown names are ignored.
  pub fn remove_step(&mut self, step_name: &str) {
    self.steps.retain(|s| s.name != step_name);
    self.handlers.remove(step_name);
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) -> Result<(), FlowError> {
    self.ensure_step_exists(step_name)?;
    for step in self.steps.iter_mut().filter(|s| s.name == step_name) {
      step.optional = optional;
    }
    Ok(())
  }
}
