use crate::error::{config_error, BoardResult};
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Where the events document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventsSource {
    Http(Url),
    File(PathBuf),
}

impl EventsSource {
    /// Parse a configured location: http(s) and file URLs, or a plain filesystem path
    pub fn parse(location: &str) -> BoardResult<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(config_error("Events source must not be empty"));
        }

        match Url::parse(location) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(EventsSource::Http(url)),
                "file" => url
                    .to_file_path()
                    .map(EventsSource::File)
                    .map_err(|_| config_error(&format!("Invalid file URL: {}", location))),
                // Windows drive letters parse as a one-letter scheme
                scheme if scheme.len() == 1 => Ok(EventsSource::File(PathBuf::from(location))),
                scheme => Err(config_error(&format!(
                    "Unsupported events source scheme: {}",
                    scheme
                ))),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(EventsSource::File(PathBuf::from(location)))
            }
            Err(e) => Err(config_error(&format!(
                "Invalid events source {}: {}",
                location, e
            ))),
        }
    }
}

impl fmt::Display for EventsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventsSource::Http(url) => write!(f, "{}", url),
            EventsSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources() {
        assert_eq!(
            EventsSource::parse("events_data.json").unwrap(),
            EventsSource::File(PathBuf::from("events_data.json"))
        );
        assert_eq!(
            EventsSource::parse("/srv/board/events_data.json").unwrap(),
            EventsSource::File(PathBuf::from("/srv/board/events_data.json"))
        );
        assert!(matches!(
            EventsSource::parse("https://events.example.edu/events_data.json").unwrap(),
            EventsSource::Http(_)
        ));
        assert!(matches!(
            EventsSource::parse("file:///srv/board/events_data.json").unwrap(),
            EventsSource::File(_)
        ));

        assert!(EventsSource::parse("").is_err());
        assert!(EventsSource::parse("ftp://events.example.edu/events.json").is_err());
    }
}
