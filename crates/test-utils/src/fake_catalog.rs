use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pipeline_builder::catalog::{AvailableTasks, CatalogBackend};
use pipeline_builder::errors::{BuilderError, Result};
use pipeline_builder::model::TaskName;
use tracing::debug;

/// A catalog that answers from memory and counts how often it was asked.
pub struct StaticCatalog {
    available: AvailableTasks,
    calls: Arc<AtomicUsize>,
}

impl StaticCatalog {
    pub fn new(available: AvailableTasks) -> Self {
        Self {
            available,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl CatalogBackend for StaticCatalog {
    fn list_available(
        &self,
        excluding: Vec<TaskName>,
    ) -> Pin<Box<dyn Future<Output = Result<AvailableTasks>> + Send + '_>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(call, excluded = excluding.len(), "static catalog queried");
        let available = self.available.excluding(&excluding);
        Box::pin(async move { Ok(available) })
    }
}

/// A catalog whose every request fails with the given reason.
pub struct FailingCatalog {
    reason: String,
}

impl FailingCatalog {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl CatalogBackend for FailingCatalog {
    fn list_available(
        &self,
        _excluding: Vec<TaskName>,
    ) -> Pin<Box<dyn Future<Output = Result<AvailableTasks>> + Send + '_>> {
        let reason = self.reason.clone();
        debug!(%reason, "failing catalog queried");
        Box::pin(async move { Err(BuilderError::CatalogError(reason)) })
    }
}
