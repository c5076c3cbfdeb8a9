use crate::config::Config;
use crate::error::BoardResult;
use async_trait::async_trait;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

// Export components
pub mod board;
pub mod events_feed;
pub mod snapshot;

// Re-export the board component and feed handle
pub use board::EventsBoard;
pub use events_feed::EventsFeedHandle;

/// Component trait that all components must implement
#[async_trait]
pub trait Component: Send + Sync + Any {
    /// Get the name of the component
    fn name(&self) -> &'static str;

    /// Initialize the component
    async fn init(&self, config: Arc<RwLock<Config>>) -> BoardResult<()>;

    /// Shutdown the component
    async fn shutdown(&self) -> BoardResult<()>;

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Manager for all components
pub struct ComponentManager {
    components: Vec<Box<dyn Component>>,
    config: Arc<RwLock<Config>>,
}

impl fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentManager")
            .field("component_count", &self.components.len())
            .field("config", &self.config)
            .finish()
    }
}

impl ComponentManager {
    /// Create a new component manager
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            components: Vec::new(),
            config,
        }
    }

    /// Register a component
    pub fn register<T: Component + 'static>(&mut self, component: T) {
        info!("Registering component: {}", component.name());
        self.components.push(Box::new(component));
    }

    /// Initialize all registered components, returning how many came up
    pub async fn init_all(&self) -> BoardResult<usize> {
        let mut started = 0;
        for component in &self.components {
            info!("Initializing component: {}", component.name());

            match component.init(Arc::clone(&self.config)).await {
                Ok(()) => started += 1,
                // Log error but continue with other components
                Err(e) => tracing::error!(
                    "Error initializing component {}: {:?}",
                    component.name(),
                    e
                ),
            }
        }

        Ok(started)
    }

    /// Shutdown all components
    pub async fn shutdown_all(&self) -> BoardResult<()> {
        info!("Shutting down all components");

        for component in &self.components {
            info!("Shutting down component: {}", component.name());

            if let Err(e) = component.shutdown().await {
                // Log error but continue with other components
                tracing::error!(
                    "Error shutting down component {}: {:?}",
                    component.name(),
                    e
                );
            }
        }

        Ok(())
    }

    /// Get a component by name
    pub fn get_component_by_name(&self, name: &str) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }
}
