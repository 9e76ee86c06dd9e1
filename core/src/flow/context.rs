// forkful/src/flow/context.rs

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, interior-mutable state threaded through every step of a [`Flow`](super::Flow).
///
/// Cloning is cheap: all clones point at the same data.
///
/// Guards returned by [`read`](Self::read) and [`write`](Self::write) are blocking
/// locks and MUST be dropped before any `.await` inside a step handler.
#[derive(Debug)]
pub struct SharedContext<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> SharedContext<T> {
  pub fn new(data: T) -> Self {
    SharedContext(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Takes the data back out once the flow is done with it.
  ///
  /// Returns `Err(self)` while other clones are still alive.
  pub fn try_unwrap(self) -> Result<T, Self> {
    Arc::try_unwrap(self.0).map(RwLock::into_inner).map_err(SharedContext)
  }
}

impl<T: Send + Sync + 'static> Clone for SharedContext<T> {
  fn clone(&self) -> Self {
    SharedContext(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for SharedContext<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
