use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use pipeline_builder::errors::{BuilderError, Result};
use pipeline_builder::session::{SessionSink, SessionUpdate};

/// A sink that records every published update.
#[derive(Clone, Default)]
pub struct RecordingSink {
    updates: Arc<Mutex<Vec<SessionUpdate>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded updates.
    pub fn updates(&self) -> Arc<Mutex<Vec<SessionUpdate>>> {
        Arc::clone(&self.updates)
    }
}

impl SessionSink for RecordingSink {
    fn publish(
        &mut self,
        update: SessionUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let updates = Arc::clone(&self.updates);
        Box::pin(async move {
            updates.lock().unwrap().push(update);
            Ok(())
        })
    }
}

/// A sink that refuses every update, as a console whose layout step failed
/// would. Counts the attempts.
#[derive(Clone, Default)]
pub struct FailingSink {
    attempts: Arc<Mutex<usize>>,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.attempts)
    }
}

impl SessionSink for FailingSink {
    fn publish(
        &mut self,
        _update: SessionUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let attempts = Arc::clone(&self.attempts);
        Box::pin(async move {
            *attempts.lock().unwrap() += 1;
            Err(BuilderError::GraphCycle("layout input contains a cycle".to_string()))
        })
    }
}
