use super::render::{
    render_important_events, render_month_header, render_today_events, render_week_strip,
};
use super::sink::BoardSink;
use super::view::RegionUpdate;
use crate::components::events_feed::{EventsFeedHandle, EventsFetcher};
use crate::components::snapshot::SnapshotHandle;
use crate::config::{Config, DisplaySettings};
use crate::error::{component_error, BoardResult};
use crate::utils::scheduler::Scheduler;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// What a single update cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Fetch failed or the document matched the snapshot
    Unchanged,
    /// The document changed and both event lists were re-rendered
    Rendered { today: usize, important: usize },
}

/// One fetch, compare and render pass over the board
pub struct UpdateCycle<F: EventsFetcher> {
    fetcher: F,
    snapshot: SnapshotHandle,
    sinks: Vec<Arc<dyn BoardSink>>,
    settings: DisplaySettings,
    calendar_day: Option<NaiveDate>,
}

impl<F: EventsFetcher> UpdateCycle<F> {
    pub fn new(
        fetcher: F,
        snapshot: SnapshotHandle,
        sinks: Vec<Arc<dyn BoardSink>>,
        settings: DisplaySettings,
    ) -> Self {
        Self {
            fetcher,
            snapshot,
            sinks,
            settings,
            calendar_day: None,
        }
    }

    /// Run one update cycle at `now`
    pub async fn run_once(&mut self, now: &DateTime<Tz>) -> BoardResult<CycleOutcome> {
        self.refresh_calendar(now).await;

        let fetched = match self.fetcher.fetch().await {
            Ok(doc) => Some(doc),
            Err(e) if e.is_feed_failure() => {
                warn!("Error fetching events: {}", e);
                None
            }
            Err(e) => {
                error!("Events feed unavailable: {}", e);
                None
            }
        };

        let Some(doc) = self.snapshot.offer(fetched).await? else {
            debug!("No change in data");
            return Ok(CycleOutcome::Unchanged);
        };

        info!("Events data changed ({} events), refreshing board", doc.events.len());

        let today = render_today_events(&doc, now, &self.settings);
        let important = render_important_events(&doc, now, &self.settings);
        let outcome = CycleOutcome::Rendered {
            today: today.len(),
            important: important.len(),
        };

        self.publish(RegionUpdate::TodayEvents(today)).await;
        self.publish(RegionUpdate::ImportantEvents(important)).await;

        Ok(outcome)
    }

    /// Re-render the month header and week strip whenever the local date changes
    async fn refresh_calendar(&mut self, now: &DateTime<Tz>) {
        let today = now.date_naive();
        if self.calendar_day == Some(today) {
            return;
        }

        debug!("Rendering calendar header for {}", today);
        self.publish(RegionUpdate::MonthHeader(render_month_header(now)))
            .await;
        self.publish(RegionUpdate::WeekStrip(render_week_strip(now)))
            .await;
        self.calendar_day = Some(today);
    }

    async fn publish(&self, update: RegionUpdate) {
        for sink in &self.sinks {
            if let Err(e) = sink.present(&update).await {
                // Log error but continue with other sinks
                error!(
                    "Error presenting {} on sink {}: {:?}",
                    update.region_name(),
                    sink.name(),
                    e
                );
            }
        }
    }
}

/// Run update cycles every `interval`, starting immediately, until cancelled.
///
/// Cycles run one after another in this task, so they never overlap. A
/// cancelled token abandons the cycle in flight.
pub async fn run_polling<F: EventsFetcher>(
    mut cycle: UpdateCycle<F>,
    interval: Duration,
    tz: Tz,
    cancel: CancellationToken,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Board poller started (interval: {:?})", interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let now = Utc::now().with_timezone(&tz);
                debug!("Running board update cycle at {}", now);
                // A cycle stuck in a slow fetch must not hold up shutdown
                let result = tokio::select! {
                    _ = cancel.cancelled() => break,
                    result = cycle.run_once(&now) => result,
                };
                match result {
                    Ok(outcome) => debug!("Update cycle finished: {:?}", outcome),
                    // Continue polling even on error
                    Err(e) => error!("Board update cycle error: {:?}", e),
                }
            }
        }
    }

    info!("Board poller stopped");
}

/// Everything the board scheduler drives
#[derive(Clone)]
pub struct BoardResources {
    pub feed: EventsFeedHandle,
    pub snapshot: SnapshotHandle,
    pub sinks: Vec<Arc<dyn BoardSink>>,
}

/// Polls the events feed on the configured interval
#[derive(Default)]
pub struct BoardScheduler {
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl BoardScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    async fn start_polling(
        &self,
        config: Arc<RwLock<Config>>,
        resources: BoardResources,
    ) -> BoardResult<()> {
        let (interval, tz, settings) = {
            let config_read = config.read().await;
            (
                Duration::from_secs(config_read.poll_interval_secs),
                config_read.tz()?,
                config_read.display.clone(),
            )
        };

        let mut task = self.task.lock().await;
        if task.is_some() {
            return Err(component_error("Board scheduler already started"));
        }

        let cycle = UpdateCycle::new(resources.feed, resources.snapshot, resources.sinks, settings);
        *task = Some(tokio::spawn(run_polling(cycle, interval, tz, self.cancel.clone())));

        Ok(())
    }

    async fn stop_polling(&self) -> BoardResult<()> {
        self.cancel.cancel();
        if let Some(task) = self.task.lock().await.take() {
            task.await
                .map_err(|e| component_error(&format!("Board poller task failed: {}", e)))?;
        }
        Ok(())
    }
}

impl Scheduler for BoardScheduler {
    type Handle = BoardResources;

    fn start(
        &self,
        config: Arc<RwLock<Config>>,
        handle: Self::Handle,
    ) -> Pin<Box<dyn Future<Output = BoardResult<()>> + Send + '_>> {
        Box::pin(self.start_polling(config, handle))
    }

    fn stop(&self) -> Pin<Box<dyn Future<Output = BoardResult<()>> + Send + '_>> {
        Box::pin(self.stop_polling())
    }
}
