use crate::utils::time::parse_timestamp;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

/// The events document as published by the events source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EventsDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

/// A single campus event.
///
/// Missing or `null` fields fall back to empty values, so one sparse record
/// does not reject the whole document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Event {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: String,
    #[serde(default)]
    pub location: Option<Place>,
    #[serde(default)]
    pub campus: Option<Place>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Vec<Category>,
}

/// A named place, used for both locations and campuses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Place {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Event {
    /// Start time in the board timezone, `None` if the timestamp cannot be parsed
    pub fn start_at(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        parse_timestamp(&self.start, tz)
    }

    /// End time in the board timezone, `None` if the timestamp cannot be parsed
    pub fn end_at(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        parse_timestamp(&self.end, tz)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.category.iter().any(|c| c.name == name)
    }

    pub fn location_name(&self) -> Option<&str> {
        place_name(self.location.as_ref())
    }

    pub fn campus_name(&self) -> Option<&str> {
        place_name(self.campus.as_ref())
    }

    fn sorted_category_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.category.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

fn place_name(place: Option<&Place>) -> Option<&str> {
    place
        .and_then(|p| p.name.as_deref())
        .filter(|name| !name.is_empty())
}

// Categories are a set: their order in the document does not make an event different
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.start == other.start
            && self.end == other.end
            && self.location == other.location
            && self.campus == other.campus
            && self.sorted_category_names() == other.sorted_category_names()
    }
}

impl Eq for Event {}
