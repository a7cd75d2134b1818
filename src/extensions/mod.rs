pub mod observers;

pub use observers::{TimelineContext, TimelineEvent, TimelineObserver};
