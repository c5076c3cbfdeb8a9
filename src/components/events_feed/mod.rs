mod actor;
mod handle;
pub mod models;
pub mod source;

pub use actor::parse_document;
pub use handle::{EventsFeedHandle, EventsFetcher};
pub use models::{Category, Event, EventsDocument, Place};
pub use source::EventsSource;
