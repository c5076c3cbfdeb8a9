use super::classifier::CardStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Month name shown above the week strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthHeaderView {
    /// Icon glyph name for the host page's icon font
    pub icon: String,
    pub month: String,
}

/// One cell of the week strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCellView {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub day_name: String,
    pub is_today: bool,
}

/// Monday to Sunday of the current week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekStripView {
    pub days: Vec<DayCellView>,
}

/// A card in today's event list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCardView {
    pub title: String,
    pub campus: String,
    pub location: String,
    pub time_range: String,
    pub status: CardStatus,
    pub status_label: String,
}

/// A row in the important events list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantEntryView {
    pub day_of_month: u32,
    pub day_name: String,
    pub title: String,
    pub time_range: String,
    pub campus: String,
    pub location: String,
}

/// Full replacement content for one board region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "region", content = "content", rename_all = "snake_case")]
pub enum RegionUpdate {
    MonthHeader(MonthHeaderView),
    WeekStrip(WeekStripView),
    TodayEvents(Vec<EventCardView>),
    ImportantEvents(Vec<ImportantEntryView>),
}

impl RegionUpdate {
    pub fn region_name(&self) -> &'static str {
        match self {
            RegionUpdate::MonthHeader(_) => "month_header",
            RegionUpdate::WeekStrip(_) => "week_strip",
            RegionUpdate::TodayEvents(_) => "today_events",
            RegionUpdate::ImportantEvents(_) => "important_events",
        }
    }
}

/// The whole board, as written by the JSON adapter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub month_header: Option<MonthHeaderView>,
    pub week_strip: Option<WeekStripView>,
    pub today_events: Vec<EventCardView>,
    pub important_events: Vec<ImportantEntryView>,
}

impl BoardView {
    /// Replace the region named by `update`
    pub fn apply(&mut self, update: &RegionUpdate) {
        match update {
            RegionUpdate::MonthHeader(header) => self.month_header = Some(header.clone()),
            RegionUpdate::WeekStrip(strip) => self.week_strip = Some(strip.clone()),
            RegionUpdate::TodayEvents(cards) => self.today_events = cards.clone(),
            RegionUpdate::ImportantEvents(entries) => self.important_events = entries.clone(),
        }
    }
}
