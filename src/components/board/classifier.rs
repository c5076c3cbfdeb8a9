//! Pure filters that turn the raw events document into the board's views.
//!
//! Every function takes the document and a reference instant, never mutates
//! the document, and returns events in ascending start order. Ties keep their
//! document order. Events whose start cannot be parsed are never selected.

use crate::components::events_feed::{Event, EventsDocument};
use crate::config::DisplaySettings;
use crate::utils::time::{days_ahead, end_of_day, start_of_day};
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Events starting between `now` (inclusive) and the end of today
pub fn today_events<'a>(doc: &'a EventsDocument, now: &DateTime<Tz>) -> Vec<&'a Event> {
    let end_of_today = end_of_day(now);
    select_sorted(doc.events.iter(), now, |start| start >= now && *start <= end_of_today)
}

/// Important events from the start of today up to `important_window_days` from now.
///
/// The lower bound is midnight of today, not `now`, so events earlier today
/// that already started are still listed.
pub fn important_upcoming<'a>(
    doc: &'a EventsDocument,
    now: &DateTime<Tz>,
    settings: &DisplaySettings,
) -> Vec<&'a Event> {
    let window_start = start_of_day(now);
    let window_end = days_ahead(now, settings.important_window_days);

    let important = doc.events.iter().filter(|event| {
        settings
            .important_categories
            .iter()
            .any(|name| event.has_category(name))
    });
    select_sorted(important, now, |start| {
        // A window reaching past the calendar's range has no upper bound
        *start > window_start && window_end.map_or(true, |end| *start <= end)
    })
}

/// Every event starting after `now`. Not shown on the board.
pub fn future_events<'a>(doc: &'a EventsDocument, now: &DateTime<Tz>) -> Vec<&'a Event> {
    select_sorted(doc.events.iter(), now, |start| start > now)
}

fn select_sorted<'a>(
    events: impl Iterator<Item = &'a Event>,
    now: &DateTime<Tz>,
    keep: impl Fn(&DateTime<Tz>) -> bool,
) -> Vec<&'a Event> {
    let tz = now.timezone();
    let mut selected: Vec<(DateTime<Tz>, &Event)> = events
        .filter_map(|event| event.start_at(&tz).map(|start| (start, event)))
        .filter(|(start, _)| keep(start))
        .collect();
    // sort_by_key is stable, so equal starts keep document order
    selected.sort_by_key(|(start, _)| *start);
    selected.into_iter().map(|(_, event)| event).collect()
}

/// How a card in today's list is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    HappeningSoon,
    LaterToday,
}

impl CardStatus {
    /// `HappeningSoon` when the event starts after `now` and no later than `now + soon_window`
    pub fn classify(start: &DateTime<Tz>, now: &DateTime<Tz>, soon_window: Duration) -> Self {
        let until_start = *start - *now;
        if until_start > Duration::zero() && until_start <= soon_window {
            CardStatus::HappeningSoon
        } else {
            CardStatus::LaterToday
        }
    }
}
