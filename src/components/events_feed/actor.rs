use super::models::EventsDocument;
use super::source::EventsSource;
use crate::error::{component_error, fetch_error, parse_error, BoardResult};
use reqwest::Client;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The events feed actor that processes fetch requests
pub struct EventsFeedActor {
    source: EventsSource,
    client: Client,
    command_rx: mpsc::Receiver<EventsFeedCommand>,
}

/// Commands that can be sent to the events feed actor
pub enum EventsFeedCommand {
    Fetch(mpsc::Sender<BoardResult<EventsDocument>>),
    Shutdown,
}

/// Handle for communicating with the events feed actor
#[derive(Clone)]
pub struct EventsFeedActorHandle {
    command_tx: mpsc::Sender<EventsFeedCommand>,
}

impl EventsFeedActorHandle {
    /// Fetch and parse the events document
    pub async fn fetch(&self) -> BoardResult<EventsDocument> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(EventsFeedCommand::Fetch(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> BoardResult<()> {
        let _ = self.command_tx.send(EventsFeedCommand::Shutdown).await;
        Ok(())
    }
}

impl EventsFeedActor {
    /// Create a new actor and return its handle
    pub fn new(source: EventsSource, client: Client) -> (Self, EventsFeedActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            source,
            client,
            command_rx,
        };

        let handle = EventsFeedActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Events feed actor started for {}", self.source);

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                EventsFeedCommand::Fetch(response_tx) => {
                    let result = fetch_document(&self.client, &self.source).await;
                    let _ = response_tx.send(result).await;
                }
                EventsFeedCommand::Shutdown => {
                    info!("Events feed actor shutting down");
                    break;
                }
            }
        }

        info!("Events feed actor shut down");
    }
}

/// Read the events document from its source
pub async fn fetch_document(client: &Client, source: &EventsSource) -> BoardResult<EventsDocument> {
    let body = match source {
        EventsSource::Http(url) => {
            let response = client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| fetch_error(&format!("Failed to fetch events: {}", e)))?;

            if !response.status().is_success() {
                return Err(fetch_error(&format!(
                    "Failed to fetch events: HTTP {}",
                    response.status()
                )));
            }

            response
                .bytes()
                .await
                .map_err(|e| fetch_error(&format!("Failed to read events response: {}", e)))?
                .to_vec()
        }
        EventsSource::File(path) => tokio::fs::read(path).await.map_err(|e| {
            fetch_error(&format!("Failed to read {}: {}", path.display(), e))
        })?,
    };

    debug!("Fetched {} bytes from {}", body.len(), source);
    parse_document(&body)
}

/// Parse a raw response body into an events document
pub fn parse_document(body: &[u8]) -> BoardResult<EventsDocument> {
    serde_json::from_slice(body)
        .map_err(|e| parse_error(&format!("Failed to parse events document: {}", e)))
}
