mod duration_controller;
mod engine;
mod engine_config;
mod invalidation;
mod marker_controller;
mod observer_registry;
mod outcome;
mod value_controller;

pub use engine::TimelineEngine;
pub use engine_config::TimelineConfig;
pub use invalidation::{InvalidationTopic, InvalidationTopics};
pub use outcome::{EditOutcome, IgnoreReason};
