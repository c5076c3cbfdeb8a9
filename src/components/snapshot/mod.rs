mod actor;
mod detector;

pub use actor::{SnapshotActor, SnapshotHandle};
pub use detector::ChangeDetector;
