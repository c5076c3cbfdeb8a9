use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the board
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Events fetch error: {0}")]
    #[diagnostic(code(campus_board::fetch))]
    Fetch(String),

    #[error("Events parse error: {0}")]
    #[diagnostic(code(campus_board::parse))]
    Parse(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(campus_board::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(campus_board::config))]
    Config(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(campus_board::component))]
    Component(String),

    #[error("Render error: {0}")]
    #[diagnostic(code(campus_board::render))]
    Render(String),

    #[error(transparent)]
    #[diagnostic(code(campus_board::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(campus_board::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(campus_board::other))]
    Other(String),
}

impl Error {
    /// Fetch and parse failures are the only kinds an update cycle absorbs
    pub fn is_feed_failure(&self) -> bool {
        matches!(self, Error::Fetch(_) | Error::Parse(_))
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type BoardResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create fetch errors
pub fn fetch_error(message: &str) -> Error {
    Error::Fetch(message.to_string())
}

/// Helper to create parse errors
pub fn parse_error(message: &str) -> Error {
    Error::Parse(message.to_string())
}

/// Helper to create render errors
pub fn render_error(message: &str) -> Error {
    Error::Render(message.to_string())
}
