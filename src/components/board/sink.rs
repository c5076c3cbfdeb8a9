use super::view::{BoardView, RegionUpdate};
use crate::error::{render_error, BoardResult};
use crate::utils::i18n;
use async_trait::async_trait;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Output adapter that maps region view-models onto a concrete display
#[async_trait]
pub trait BoardSink: Send + Sync {
    fn name(&self) -> &'static str;

    /// Replace the content of one region
    async fn present(&self, update: &RegionUpdate) -> BoardResult<()>;
}

/// Prints each region update as plain text on stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

#[async_trait]
impl BoardSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn present(&self, update: &RegionUpdate) -> BoardResult<()> {
        println!("{}", format_region(update));
        Ok(())
    }
}

/// Plain-text rendering of a region
pub fn format_region(update: &RegionUpdate) -> String {
    let mut out = String::new();
    match update {
        RegionUpdate::MonthHeader(header) => {
            let _ = write!(out, "=== {} ===", header.month);
        }
        RegionUpdate::WeekStrip(strip) => {
            let cells: Vec<String> = strip
                .days
                .iter()
                .map(|day| {
                    let cell = format!("{} {}", day.day_name, day.day_of_month);
                    if day.is_today {
                        format!("[{}]", cell)
                    } else {
                        format!(" {} ", cell)
                    }
                })
                .collect();
            out.push_str(&cells.join(" "));
        }
        RegionUpdate::TodayEvents(cards) => {
            if cards.is_empty() {
                out.push_str(&i18n::no_events_today());
            }
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                let _ = write!(
                    out,
                    "* {} | {} | {} | {} ({})",
                    card.title, card.time_range, card.campus, card.location, card.status_label
                );
            }
        }
        RegionUpdate::ImportantEvents(entries) => {
            if entries.is_empty() {
                out.push_str(&i18n::no_important_events());
            }
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                let _ = write!(
                    out,
                    "{:>2} {} {} | {} | {} | {}",
                    entry.day_of_month,
                    entry.day_name,
                    entry.title,
                    entry.time_range,
                    entry.campus,
                    entry.location
                );
            }
        }
    }
    out
}

/// Keeps the whole board and rewrites it as a JSON file after every update
pub struct JsonFileSink {
    path: PathBuf,
    board: Mutex<BoardView>,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            board: Mutex::new(BoardView::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> BoardView {
        self.board.lock().await.clone()
    }
}

#[async_trait]
impl BoardSink for JsonFileSink {
    fn name(&self) -> &'static str {
        "json_file"
    }

    async fn present(&self, update: &RegionUpdate) -> BoardResult<()> {
        // Hold the lock across the write so files land in update order
        let mut board = self.board.lock().await;
        board.apply(update);
        let json = serde_json::to_vec_pretty(&*board)?;
        write_atomically(&self.path, &json).await?;
        debug!("Wrote {} to {}", update.region_name(), self.path.display());
        Ok(())
    }
}

/// Write to a sibling temp file and rename it over the target
async fn write_atomically(path: &Path, contents: &[u8]) -> BoardResult<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| render_error(&format!("Invalid board output path: {}", path.display())))?;
    let tmp_path = path.with_file_name(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        uuid::Uuid::new_v4()
    ));

    tokio::fs::write(&tmp_path, contents).await?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    Ok(())
}
