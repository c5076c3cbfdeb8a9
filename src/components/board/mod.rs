pub mod classifier;
pub mod render;
pub mod scheduler;
pub mod sink;
pub mod view;

pub use scheduler::{BoardResources, BoardScheduler, CycleOutcome, UpdateCycle};
pub use sink::{BoardSink, ConsoleSink, JsonFileSink};
pub use view::{BoardView, RegionUpdate};

use crate::components::events_feed::EventsFeedHandle;
use crate::components::snapshot::SnapshotActor;
use crate::config::Config;
use crate::error::BoardResult;
use crate::utils::scheduler::Scheduler;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// The campus events board: feed, snapshot and poller wired together
#[derive(Default)]
pub struct EventsBoard {
    resources: RwLock<Option<BoardResources>>,
    scheduler: BoardScheduler,
}

impl EventsBoard {
    /// Create a new events board component
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the running board's resources if it has been initialized
    pub async fn resources(&self) -> Option<BoardResources> {
        self.resources.read().await.clone()
    }
}

/// Output adapters enabled by the config
pub fn build_sinks(config: &Config) -> Vec<Arc<dyn BoardSink>> {
    let mut sinks: Vec<Arc<dyn BoardSink>> = Vec::new();
    if config.console_output {
        sinks.push(Arc::new(ConsoleSink));
    }
    if let Some(path) = &config.output_path {
        info!("Writing board view to {}", path);
        sinks.push(Arc::new(JsonFileSink::new(path)));
    }
    sinks
}

#[async_trait]
impl super::Component for EventsBoard {
    fn name(&self) -> &'static str {
        "events_board"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> BoardResult<()> {
        let mut resources_lock = self.resources.write().await;
        if resources_lock.is_some() {
            return Ok(());
        }

        let (feed, sinks) = {
            let config_read = config.read().await;
            (
                EventsFeedHandle::from_config(&config_read)?,
                build_sinks(&config_read),
            )
        };
        info!("Polling events from {}", feed.source());

        let (mut snapshot_actor, snapshot) = SnapshotActor::new();
        tokio::spawn(async move {
            snapshot_actor.run().await;
        });

        let resources = BoardResources {
            feed,
            snapshot,
            sinks,
        };
        *resources_lock = Some(resources.clone());
        drop(resources_lock);

        // Start the poller
        self.scheduler.start(config, resources).await
    }

    async fn shutdown(&self) -> BoardResult<()> {
        self.scheduler.stop().await?;

        if let Some(resources) = self.resources.write().await.take() {
            resources.feed.shutdown().await?;
            resources.snapshot.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
