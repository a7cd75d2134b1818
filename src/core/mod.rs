pub mod entities;
pub mod ids;
pub mod scale;
pub mod store;
pub mod types;
pub mod validation;

pub use entities::{Duration, TimeMarker, ValuePoint};
pub use ids::{DurationId, EntityKind, EntityRef, MarkerId, ValueId};
pub use scale::{AxisLabels, CoordinateMapper};
pub use store::{EntityStore, START_MARKER_NAME, STOP_MARKER_NAME};
pub use types::Viewport;
pub use validation::check_invariants;
