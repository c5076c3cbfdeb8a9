use super::detector::ChangeDetector;
use crate::components::events_feed::EventsDocument;
use crate::error::{component_error, BoardResult};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The snapshot actor: the single writer of the last-seen events document
pub struct SnapshotActor {
    detector: ChangeDetector,
    command_rx: mpsc::Receiver<SnapshotCommand>,
}

/// Commands that can be sent to the snapshot actor
pub enum SnapshotCommand {
    Offer(
        Option<EventsDocument>,
        mpsc::Sender<BoardResult<Option<EventsDocument>>>,
    ),
    Current(mpsc::Sender<BoardResult<Option<EventsDocument>>>),
    Shutdown,
}

/// Handle for communicating with the snapshot actor
#[derive(Clone)]
pub struct SnapshotHandle {
    command_tx: mpsc::Sender<SnapshotCommand>,
}

impl SnapshotHandle {
    /// Create a new empty handle for initialization purposes
    pub fn empty() -> Self {
        let (command_tx, _) = mpsc::channel(32);
        Self { command_tx }
    }

    /// Offer a fetched document; returns it back if it replaced the snapshot
    pub async fn offer(&self, fetched: Option<EventsDocument>) -> BoardResult<Option<EventsDocument>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(SnapshotCommand::Offer(fetched, response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    /// The current snapshot, if any document has been accepted yet
    pub async fn current(&self) -> BoardResult<Option<EventsDocument>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(SnapshotCommand::Current(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> BoardResult<()> {
        let _ = self.command_tx.send(SnapshotCommand::Shutdown).await;
        Ok(())
    }
}

impl SnapshotActor {
    /// Create a new actor and return its handle
    pub fn new() -> (Self, SnapshotHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            detector: ChangeDetector::new(),
            command_rx,
        };

        (actor, SnapshotHandle { command_tx })
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Snapshot actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                SnapshotCommand::Offer(fetched, response_tx) => {
                    let accepted = self.detector.observe(fetched).cloned();
                    match &accepted {
                        Some(doc) => debug!("Snapshot replaced ({} events)", doc.events.len()),
                        None => debug!("Snapshot unchanged"),
                    }
                    let _ = response_tx.send(Ok(accepted)).await;
                }
                SnapshotCommand::Current(response_tx) => {
                    let _ = response_tx
                        .send(Ok(self.detector.last_seen().cloned()))
                        .await;
                }
                SnapshotCommand::Shutdown => {
                    info!("Snapshot actor shutting down");
                    break;
                }
            }
        }

        info!("Snapshot actor shut down");
    }
}
