use crate::components::{ComponentManager, EventsBoard};
use crate::config::Config;
use crate::error::{component_error, Error};
use crate::shutdown;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Start the board components and run until a shutdown signal arrives
pub async fn start_board(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    // Set locale from config
    {
        let config_read = config.read().await;
        crate::utils::i18n::set_locale(&config_read.board_locale);
        info!("Setting locale to {}", config_read.board_locale);
    }

    // Initialize component manager
    let mut component_manager = ComponentManager::new(Arc::clone(&config));

    // Register the events board
    component_manager.register(EventsBoard::new());

    let component_manager = Arc::new(component_manager);

    if component_manager.init_all().await? == 0 {
        return Err(component_error("No components could be started").into());
    }

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let shutdown_components = Arc::clone(&component_manager);
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components).await;
    });

    info!("Campus board running. Press Ctrl+C to stop.");

    match shutdown_recv.await {
        Ok(()) => info!("Campus board stopped"),
        Err(_) => error!("Signal handler ended without completing shutdown"),
    }
    Ok(())
}
