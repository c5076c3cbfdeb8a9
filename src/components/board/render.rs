//! Renderers that turn classified events into region view-models.
//!
//! Each renderer returns the full content of its region, so applying the same
//! output twice leaves the region unchanged.

use super::classifier::{important_upcoming, today_events, CardStatus};
use super::view::{
    DayCellView, EventCardView, ImportantEntryView, MonthHeaderView, WeekStripView,
};
use crate::components::events_feed::{Event, EventsDocument};
use crate::config::DisplaySettings;
use crate::utils::i18n;
use crate::utils::time::{format_time_range, week_dates};
use chrono::{DateTime, Datelike, Locale, NaiveDate};
use chrono_tz::Tz;

/// Icon glyph shown next to the month name
pub const MONTH_ICON: &str = "calendar3";

/// Month and weekday names follow the board locale
pub fn render_month_header(now: &DateTime<Tz>) -> MonthHeaderView {
    MonthHeaderView {
        icon: MONTH_ICON.to_string(),
        month: month_name(now.date_naive(), i18n::date_locale()),
    }
}

/// Monday-start week containing today, with today's cell marked
pub fn render_week_strip(now: &DateTime<Tz>) -> WeekStripView {
    let today = now.date_naive();
    let locale = i18n::date_locale();
    let days = week_dates(today)
        .into_iter()
        .map(|date| DayCellView {
            date,
            day_of_month: date.day(),
            day_name: day_name(date, locale),
            is_today: date == today,
        })
        .collect();

    WeekStripView { days }
}

/// Cards for the rest of today, soonest first
pub fn render_today_events(
    doc: &EventsDocument,
    now: &DateTime<Tz>,
    settings: &DisplaySettings,
) -> Vec<EventCardView> {
    let tz = now.timezone();
    let soon_window = settings.soon_window();

    today_events(doc, now)
        .into_iter()
        .take(settings.today_limit)
        .filter_map(|event| {
            let start = event.start_at(&tz)?;
            let status = CardStatus::classify(&start, now, soon_window);
            Some(EventCardView {
                title: event.title.clone(),
                campus: or_not_available(event.campus_name()),
                location: or_not_available(event.location_name()),
                time_range: format_time_range(&start, event.end_at(&tz).as_ref()),
                status,
                status_label: status_label(status),
            })
        })
        .collect()
}

/// Entries for important events in the coming days
pub fn render_important_events(
    doc: &EventsDocument,
    now: &DateTime<Tz>,
    settings: &DisplaySettings,
) -> Vec<ImportantEntryView> {
    let tz = now.timezone();
    let locale = i18n::date_locale();

    important_upcoming(doc, now, settings)
        .into_iter()
        .take(settings.important_limit)
        .filter_map(|event| important_entry(event, &tz, locale))
        .collect()
}

fn important_entry(event: &Event, tz: &Tz, locale: Locale) -> Option<ImportantEntryView> {
    let start = event.start_at(tz)?;
    Some(ImportantEntryView {
        day_of_month: start.day(),
        day_name: day_name(start.date_naive(), locale),
        title: event.title.clone(),
        time_range: format_time_range(&start, event.end_at(tz).as_ref()),
        campus: or_not_available(event.campus_name()),
        location: or_not_available(event.location_name()),
    })
}

fn month_name(date: NaiveDate, locale: Locale) -> String {
    date.format_localized("%B", locale).to_string()
}

fn day_name(date: NaiveDate, locale: Locale) -> String {
    date.format_localized("%a", locale).to_string()
}

fn status_label(status: CardStatus) -> String {
    match status {
        CardStatus::HappeningSoon => i18n::happening_soon(),
        CardStatus::LaterToday => i18n::later_today(),
    }
}

fn or_not_available(name: Option<&str>) -> String {
    name.map(str::to_string).unwrap_or_else(i18n::not_available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::events_feed::{Category, Place};
    use chrono::{Duration, TimeZone};
    use chrono_tz::America::Chicago;

    // Wednesday, 2024-10-16 at 10:00 local
    fn now() -> DateTime<Tz> {
        Chicago.with_ymd_and_hms(2024, 10, 16, 10, 0, 0).unwrap()
    }

    fn event(title: &str, start: DateTime<Tz>, length: Duration) -> Event {
        Event {
            title: title.to_string(),
            start: start.to_rfc3339(),
            end: (start + length).to_rfc3339(),
            location: Some(Place {
                name: Some("Library 101".to_string()),
            }),
            campus: Some(Place {
                name: Some("Main".to_string()),
            }),
            category: Vec::new(),
        }
    }

    #[test]
    fn test_month_header() {
        let header = render_month_header(&now());
        assert_eq!(header.month, "October");
        assert_eq!(header.icon, MONTH_ICON);
    }

    #[test]
    fn week_strip_for_wednesday() {
        let strip = render_week_strip(&now());
        assert_eq!(strip.days.len(), 7);

        let first = &strip.days[0];
        assert_eq!((first.day_of_month, first.day_name.as_str()), (14, "Mon"));
        let last = &strip.days[6];
        assert_eq!((last.day_of_month, last.day_name.as_str()), (20, "Sun"));

        let marked: Vec<_> = strip.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].day_of_month, 16);
        assert_eq!(marked[0].day_name, "Wed");
    }

    #[test]
    fn calendar_names_follow_locale() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        assert_eq!(month_name(wednesday, Locale::en_US), "October");
        assert_eq!(day_name(wednesday, Locale::en_US), "Wed");
        assert_eq!(month_name(wednesday, Locale::fi_FI), "lokakuu");
        assert_eq!(day_name(wednesday, Locale::fi_FI), "ke");
    }

    #[test]
    fn week_strip_for_sunday_ends_on_sunday() {
        let sunday = Chicago.with_ymd_and_hms(2024, 10, 20, 18, 0, 0).unwrap();
        let strip = render_week_strip(&sunday);
        assert_eq!(strip.days[0].day_of_month, 14);
        assert!(strip.days[6].is_today);
    }

    #[test]
    fn card_soon_and_later() {
        let now = now();
        let doc = EventsDocument {
            events: vec![
                event("A", now + Duration::minutes(30), Duration::minutes(30)),
                event("B", now + Duration::hours(3), Duration::hours(1)),
            ],
        };

        let cards = render_today_events(&doc, &now, &DisplaySettings::default());
        assert_eq!(cards.len(), 2);

        assert_eq!(cards[0].title, "A");
        assert_eq!(cards[0].status, CardStatus::HappeningSoon);
        assert_eq!(cards[0].status_label, "Happening soon");
        assert_eq!(cards[0].time_range, "10:30 AM - 11:00 AM");
        assert_eq!(cards[0].campus, "Main");
        assert_eq!(cards[0].location, "Library 101");

        assert_eq!(cards[1].title, "B");
        assert_eq!(cards[1].status, CardStatus::LaterToday);
        assert_eq!(cards[1].status_label, "Later today");
        assert_eq!(cards[1].time_range, "1:00 PM - 2:00 PM");
    }

    #[test]
    fn today_list_is_capped() {
        let now = now();
        let events = (0..15)
            .map(|i| event(&format!("Event {}", i), now + Duration::minutes(10 * i), Duration::minutes(5)))
            .collect();
        let doc = EventsDocument { events };

        let cards = render_today_events(&doc, &now, &DisplaySettings::default());
        assert_eq!(cards.len(), 10);
        assert_eq!(cards[0].title, "Event 0");
        assert_eq!(cards[9].title, "Event 9");
    }

    #[test]
    fn important_entries_default_missing_places() {
        let now = now();
        let mut lecture = event("Guest Lecture", now + Duration::days(2), Duration::hours(2));
        lecture.location = None;
        lecture.campus = Some(Place { name: None });
        lecture.category = vec![Category {
            name: "Important".to_string(),
        }];
        let doc = EventsDocument {
            events: vec![lecture],
        };

        let entries = render_important_events(&doc, &now, &DisplaySettings::default());
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.day_of_month, 18);
        assert_eq!(entry.day_name, "Fri");
        assert_eq!(entry.title, "Guest Lecture");
        assert_eq!(entry.time_range, "10:00 AM - 12:00 PM");
        assert_eq!(entry.location, "N/A");
        assert_eq!(entry.campus, "N/A");
    }

    #[test]
    fn important_list_is_capped() {
        let now = now();
        let events = (1..=8)
            .map(|i| {
                let mut e = event(&format!("Deadline {}", i), now + Duration::hours(i), Duration::hours(1));
                e.category = vec![Category {
                    name: "Scholarly Resources".to_string(),
                }];
                e
            })
            .collect();
        let doc = EventsDocument { events };

        let entries = render_important_events(&doc, &now, &DisplaySettings::default());
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[4].title, "Deadline 5");
    }

    #[test]
    fn rendering_is_deterministic() {
        let now = now();
        let doc = EventsDocument {
            events: vec![event("A", now + Duration::hours(1), Duration::hours(1))],
        };
        let settings = DisplaySettings::default();

        assert_eq!(
            render_today_events(&doc, &now, &settings),
            render_today_events(&doc, &now, &settings)
        );
        assert_eq!(render_week_strip(&now), render_week_strip(&now));
    }
}
