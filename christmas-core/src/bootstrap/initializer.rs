use async_trait::async_trait;
use std::sync::Arc;

use crate::Result;

/// A collaborator the bootstrap runner brings up once per process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Initializer: Send + Sync {
    /// Short name used in log records
    fn name(&self) -> &'static str;

    /// Bring the collaborator up. Any error is fatal to the bootstrap.
    async fn initialize(&self) -> Result<()>;
}

// Lets callers keep a handle to the initialized state after the runner is gone.
#[async_trait]
impl<T: Initializer + ?Sized> Initializer for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn initialize(&self) -> Result<()> {
        (**self).initialize().await
    }
}
