use crate::error::{config_error, env_error, BoardResult};
use chrono::Duration;
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Default location of the events document
pub const DEFAULT_EVENTS_SOURCE: &str = "events_data.json";

/// Default display settings file, relative to the working directory
pub const DISPLAY_CONFIG_PATH: &str = "config/board.toml";

/// Longest "happening soon" window accepted from the display settings
pub const MAX_SOON_WINDOW_MINUTES: i64 = 24 * 60;

/// Longest important-events window accepted from the display settings
pub const MAX_IMPORTANT_WINDOW_DAYS: u64 = 366;

/// Main configuration structure for the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL or filesystem path of the events document
    pub events_source: String,
    /// Seconds between update cycles
    pub poll_interval_secs: u64,
    /// Upper bound for a single fetch
    pub fetch_timeout_secs: u64,
    /// Timezone that defines "today" for the board
    pub timezone: String,
    /// Locale used for the board's labels
    pub board_locale: String,
    /// Optional path the JSON board view is written to
    pub output_path: Option<String>,
    /// Print region updates to stdout
    pub console_output: bool,
    /// How the regions are filled
    pub display: DisplaySettings,
}

/// Tunables for the classifier and renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum number of cards in today's list
    pub today_limit: usize,
    /// Maximum number of entries in the important list
    pub important_limit: usize,
    /// Cards starting within this many minutes are "happening soon"
    pub soon_window_minutes: i64,
    /// Calendar days ahead covered by the important list
    pub important_window_days: u64,
    /// A single matching category makes an event important
    pub important_categories: Vec<String>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            today_limit: 10,
            important_limit: 5,
            soon_window_minutes: 120,
            important_window_days: 5,
            important_categories: vec![
                "Important".to_string(),
                "Scholarly Resources".to_string(),
            ],
        }
    }
}

impl DisplaySettings {
    /// Saturates instead of overflowing for out-of-range minute counts
    pub fn soon_window(&self) -> Duration {
        match Duration::try_minutes(self.soon_window_minutes) {
            Some(window) => window,
            None if self.soon_window_minutes < 0 => Duration::MIN,
            None => Duration::MAX,
        }
    }

    /// Load display settings from a TOML file, falling back to defaults if it is missing
    pub fn from_file(path: impl AsRef<Path>) -> BoardResult<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(content) => Ok(toml::from_str::<DisplaySettings>(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            events_source: DEFAULT_EVENTS_SOURCE.to_string(),
            poll_interval_secs: 60,
            fetch_timeout_secs: 30,
            timezone: "UTC".to_string(),
            board_locale: "en".to_string(),
            output_path: None,
            console_output: true,
            display: DisplaySettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> BoardResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        let events_source =
            env::var("EVENTS_SOURCE").unwrap_or(defaults.events_source);
        let poll_interval_secs =
            parse_env_or("POLL_INTERVAL_SECONDS", defaults.poll_interval_secs)?;
        let fetch_timeout_secs =
            parse_env_or("FETCH_TIMEOUT_SECONDS", defaults.fetch_timeout_secs)?;
        let timezone = env::var("TIMEZONE").unwrap_or(defaults.timezone);
        let board_locale = env::var("BOARD_LOCALE").unwrap_or(defaults.board_locale);
        let output_path = env::var("BOARD_OUTPUT").ok().filter(|p| !p.trim().is_empty());
        let console_output = parse_env_or("BOARD_CONSOLE", defaults.console_output)?;

        let display = DisplaySettings::from_file(DISPLAY_CONFIG_PATH)?;

        let config = Config {
            events_source,
            poll_interval_secs,
            fetch_timeout_secs,
            timezone,
            board_locale,
            output_path,
            console_output,
            display,
        };
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the poller cannot run with
    pub fn validate(&self) -> BoardResult<()> {
        if self.poll_interval_secs == 0 {
            return Err(config_error("POLL_INTERVAL_SECONDS must be greater than zero"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(config_error("FETCH_TIMEOUT_SECONDS must be greater than zero"));
        }
        if self.events_source.trim().is_empty() {
            return Err(config_error("EVENTS_SOURCE must not be empty"));
        }
        if !(0..=MAX_SOON_WINDOW_MINUTES).contains(&self.display.soon_window_minutes) {
            return Err(config_error(&format!(
                "soon_window_minutes must be between 0 and {}",
                MAX_SOON_WINDOW_MINUTES
            )));
        }
        if self.display.important_window_days > MAX_IMPORTANT_WINDOW_DAYS {
            return Err(config_error(&format!(
                "important_window_days must be at most {}",
                MAX_IMPORTANT_WINDOW_DAYS
            )));
        }
        self.tz()?;
        Ok(())
    }

    /// Parsed board timezone
    pub fn tz(&self) -> BoardResult<Tz> {
        Tz::from_str(&self.timezone)
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}

fn parse_env_or<T: FromStr>(var: &str, default: T) -> BoardResult<T> {
    match env::var(var) {
        Ok(value) => value.trim().parse::<T>().map_err(|_| env_error(var)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tz().unwrap(), chrono_tz::UTC);
        assert_eq!(config.display.soon_window(), Duration::hours(2));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let config = Config {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = Config {
            poll_interval_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_display_windows_are_rejected() {
        let mut config = Config::default();
        config.display.important_window_days = 1_000_000_000_000;
        assert!(matches!(config.validate(), Err(crate::error::Error::Config(_))));

        let mut config = Config::default();
        config.display.soon_window_minutes = i64::MAX;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.soon_window_minutes = -1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.important_window_days = MAX_IMPORTANT_WINDOW_DAYS;
        config.display.soon_window_minutes = MAX_SOON_WINDOW_MINUTES;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn soon_window_saturates() {
        let settings = DisplaySettings {
            soon_window_minutes: i64::MAX,
            ..DisplaySettings::default()
        };
        assert_eq!(settings.soon_window(), Duration::MAX);
    }

    #[test]
    fn partial_display_settings_merge_over_defaults() {
        let settings: DisplaySettings = toml::from_str("today_limit = 4").unwrap();
        assert_eq!(settings.today_limit, 4);
        assert_eq!(settings.important_limit, 5);
        assert_eq!(settings.important_categories.len(), 2);
    }

    #[test]
    fn missing_display_file_gives_defaults() {
        let settings = DisplaySettings::from_file("does/not/exist/board.toml").unwrap();
        assert_eq!(settings, DisplaySettings::default());
    }
}
