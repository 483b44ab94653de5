// src/session/pending.rs

use std::collections::VecDeque;

use tracing::debug;

use crate::session::EditRequest;

/// Edit requests that arrived while the catalog was still loading.
///
/// Semantics:
/// - A request that needs the catalog (resolve / fix) is parked here, and so
///   is every request arriving after it, so edits keep their arrival order.
/// - Requests are replayed in arrival order once the catalog settles. If the
///   catalog failed, the ones that need it are rejected and the rest applied.
/// - Closing the session discards whatever is still parked.
#[derive(Debug, Default)]
pub struct PendingEdits {
    requests: VecDeque<EditRequest>,
}

impl PendingEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, request: EditRequest) {
        self.requests.push_back(request);
        debug!(
            pending = self.requests.len(),
            "catalog still loading; parked edit request"
        );
    }

    /// Take every parked request, oldest first.
    pub fn drain(&mut self) -> Vec<EditRequest> {
        self.requests.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }
}
