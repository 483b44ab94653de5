// src/session/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::catalog::CatalogBackend;
use crate::errors::Result;

use super::core::EditorSession;
use super::sink::SessionSink;
use super::{SessionEvent, SessionSummary, SessionUpdate};

/// Drives an [`EditorSession`] in response to `SessionEvent`s and hands every
/// resulting update to a [`SessionSink`].
///
/// This is a pure IO shell around `EditorSession`, which contains all the
/// editing semantics. This struct only reads events from the channel and
/// forwards updates.
pub struct SessionRuntime<S: SessionSink> {
    core: EditorSession,
    event_rx: mpsc::Receiver<SessionEvent>,
    sink: S,
}

impl<S: SessionSink> fmt::Debug for SessionRuntime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRuntime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<S: SessionSink> SessionRuntime<S> {
    pub fn new(core: EditorSession, event_rx: mpsc::Receiver<SessionEvent>, sink: S) -> Self {
        Self {
            core,
            event_rx,
            sink,
        }
    }

    /// Main event loop.
    ///
    /// - Publishes the initial view.
    /// - Feeds each received event into the core.
    /// - Publishes whatever the core returns, until it asks to stop or the
    ///   channel closes.
    ///
    /// Sink errors are logged and do not end the session.
    pub async fn run(mut self) -> Result<SessionSummary> {
        info!("editing session started");

        let initial = self.core.current_view();
        self.publish(initial).await;

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("session event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "session received event");

            let step = self.core.step(event);

            for update in step.updates {
                self.publish(update).await;
            }

            if !step.keep_running {
                info!("session ended");
                break;
            }
        }

        Ok(self.core.into_summary())
    }

    /// A sink failure loses that one update; the session keeps its state.
    async fn publish(&mut self, update: SessionUpdate) {
        if let Err(err) = self.sink.publish(update).await {
            warn!(error = %err, "failed to publish session update");
        }
    }
}

/// Fetch the catalog once in the background and report it as a
/// [`SessionEvent::CatalogLoaded`].
///
/// The full catalog is requested; the picker applies the exclusion of names
/// already in the graph at render time. If the session has already ended the
/// result is dropped.
pub fn spawn_catalog_fetch<B: CatalogBackend>(
    backend: Arc<B>,
    tx: mpsc::Sender<SessionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = backend
            .list_available(Vec::new())
            .await
            .map_err(|err| format!("{err:#}"));

        if tx.send(SessionEvent::CatalogLoaded(result)).await.is_err() {
            debug!("session gone before the catalog arrived; dropping result");
        }
    })
}
