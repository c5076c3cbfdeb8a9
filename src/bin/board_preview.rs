use campus_board::components::board::render::{
    render_important_events, render_month_header, render_today_events, render_week_strip,
};
use campus_board::components::board::sink::format_region;
use campus_board::components::board::RegionUpdate;
use campus_board::components::events_feed::{EventsFeedHandle, EventsFetcher, EventsSource};
use campus_board::config::Config;
use campus_board::error::BoardResult;
use campus_board::utils::i18n;
use chrono::Utc;
use std::time::Duration;

/// Fetch the events document once and print the board to stdout
#[tokio::main]
async fn main() -> BoardResult<()> {
    // Load configuration
    let mut config = Config::load()?;

    // An optional argument overrides the configured source
    if let Some(source) = std::env::args().nth(1) {
        config.events_source = source;
    }

    i18n::set_locale(&config.board_locale);
    let tz = config.tz()?;
    let now = Utc::now().with_timezone(&tz);

    let feed = EventsFeedHandle::new(
        EventsSource::parse(&config.events_source)?,
        Duration::from_secs(config.fetch_timeout_secs),
    )?;
    let doc = feed.fetch().await?;
    feed.shutdown().await?;

    let regions = [
        RegionUpdate::MonthHeader(render_month_header(&now)),
        RegionUpdate::WeekStrip(render_week_strip(&now)),
        RegionUpdate::TodayEvents(render_today_events(&doc, &now, &config.display)),
        RegionUpdate::ImportantEvents(render_important_events(&doc, &now, &config.display)),
    ];

    for region in &regions {
        println!("{}\n", format_region(region));
    }

    Ok(())
}
