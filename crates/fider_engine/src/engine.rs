use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use fider_core::{Generation, SearchRequest};
use fider_logging::{shell_debug, shell_trace};
use tokio::task::JoinHandle;

use crate::client::{ClientSettings, ReqwestSearchClient, SearchClient};
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    Schedule {
        generation: Generation,
        delay: Duration,
    },
    Search {
        generation: Generation,
        request: SearchRequest,
    },
    CancelPending,
}

/// Runs debounce timers and search requests off the caller's thread.
///
/// Results come back as [`EngineEvent`]s tagged with the generation they were
/// started for; deciding whether that generation is still live is up to the
/// caller. Dropping the handle stops the runtime and everything pending on it.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = ReqwestSearchClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn SearchClient>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("fider-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut pending: Vec<JoinHandle<()>> = Vec::new();
            while let Ok(command) = cmd_rx.recv() {
                pending.retain(|task| !task.is_finished());
                match command {
                    EngineCommand::CancelPending => {
                        shell_trace!("aborting {} pending task(s)", pending.len());
                        for task in pending.drain(..) {
                            task.abort();
                        }
                    }
                    EngineCommand::Schedule { generation, delay } => {
                        let event_tx = event_tx.clone();
                        pending.push(runtime.spawn(async move {
                            tokio::time::sleep(delay).await;
                            let _ = event_tx.send(EngineEvent::DebounceElapsed { generation });
                        }));
                    }
                    EngineCommand::Search {
                        generation,
                        request,
                    } => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        pending.push(runtime.spawn(async move {
                            let result = client.search(&request).await;
                            let _ = event_tx.send(EngineEvent::SearchCompleted { generation, result });
                        }));
                    }
                }
            }
            shell_debug!("engine command channel closed; shutting down");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn schedule(&self, generation: Generation, delay: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Schedule { generation, delay });
    }

    pub fn search(&self, generation: Generation, request: SearchRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            generation,
            request,
        });
    }

    /// Best-effort abort of armed timers and in-flight requests.
    pub fn cancel_pending(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelPending);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
