use super::actor::{EventsFeedActor, EventsFeedActorHandle};
use super::models::EventsDocument;
use super::source::EventsSource;
use crate::config::Config;
use crate::error::{fetch_error, BoardResult};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Anything the update cycle can pull an events document from
#[async_trait]
pub trait EventsFetcher: Send + Sync {
    async fn fetch(&self) -> BoardResult<EventsDocument>;
}

/// Handle for interacting with the events feed actor
#[derive(Clone)]
pub struct EventsFeedHandle {
    actor_handle: EventsFeedActorHandle,
    source: EventsSource,
    _actor_task: Arc<JoinHandle<()>>,
}

impl EventsFeedHandle {
    /// Create a new EventsFeedHandle and spawn the actor
    pub fn new(source: EventsSource, fetch_timeout: Duration) -> BoardResult<Self> {
        let client = Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| fetch_error(&format!("Failed to build HTTP client: {}", e)))?;

        // Create the actor and get its handle
        let (mut actor, handle) = EventsFeedActor::new(source.clone(), client);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Ok(Self {
            actor_handle: handle,
            source,
            _actor_task: Arc::new(actor_task),
        })
    }

    /// Create a handle for the source and timeout named in the config
    pub fn from_config(config: &Config) -> BoardResult<Self> {
        let source = EventsSource::parse(&config.events_source)?;
        Self::new(source, Duration::from_secs(config.fetch_timeout_secs))
    }

    pub fn source(&self) -> &EventsSource {
        &self.source
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> BoardResult<()> {
        self.actor_handle.shutdown().await
    }
}

#[async_trait]
impl EventsFetcher for EventsFeedHandle {
    async fn fetch(&self) -> BoardResult<EventsDocument> {
        self.actor_handle.fetch().await
    }
}
