use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::store::EntityStore;
use crate::core::types::Viewport;
use crate::error::{TimelineError, TimelineResult};

/// Axis extents shown as labels next to the canvas.
///
/// Hosts compare consecutive snapshots to skip redrawing unchanged labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub start: f64,
    pub stop: f64,
    pub max_magnitude: f64,
}

/// Linear mapping between timeline domain values and display coordinates.
///
/// The mapper borrows the store and recomputes its extrema on every call, so
/// it never goes stale; hosts must not cache results across edits.
/// Y grows downward: magnitude `0` maps to the bottom edge.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper<'a> {
    store: &'a EntityStore,
    viewport: Viewport,
    magnitude_headroom: f64,
}

impl<'a> CoordinateMapper<'a> {
    #[must_use]
    pub fn new(store: &'a EntityStore, viewport: Viewport, magnitude_headroom: f64) -> Self {
        Self {
            store,
            viewport,
            magnitude_headroom,
        }
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    /// Time value of the `Stop` marker.
    pub fn max_time(self) -> TimelineResult<f64> {
        self.store
            .marker(self.store.stop_marker())
            .map(|marker| marker.value())
            .ok_or(TimelineError::UnknownMarker(self.store.stop_marker().raw()))
    }

    /// Largest value magnitude scaled by the configured headroom.
    pub fn max_magnitude(self) -> TimelineResult<f64> {
        self.store
            .values()
            .values()
            .map(|value| OrderedFloat(value.value()))
            .max()
            .map(|max| self.magnitude_headroom * max.into_inner())
            .ok_or(TimelineError::EmptyModel)
    }

    pub fn time_to_x(self, time: f64) -> TimelineResult<f64> {
        ensure_finite(time, "time")?;
        let max_time = non_degenerate(self.max_time()?, "time")?;
        Ok(f64::from(self.viewport.width) / max_time * time)
    }

    pub fn x_to_time(self, x: f64) -> TimelineResult<f64> {
        ensure_finite(x, "x")?;
        let max_time = non_degenerate(self.max_time()?, "time")?;
        Ok(max_time / f64::from(self.viewport.width) * x)
    }

    pub fn magnitude_to_y(self, magnitude: f64) -> TimelineResult<f64> {
        ensure_finite(magnitude, "magnitude")?;
        let max_magnitude = non_degenerate(self.max_magnitude()?, "magnitude")?;
        let height = f64::from(self.viewport.height);
        Ok(height - height / max_magnitude * magnitude)
    }

    pub fn y_to_magnitude(self, y: f64) -> TimelineResult<f64> {
        ensure_finite(y, "y")?;
        let max_magnitude = self.max_magnitude()?;
        Ok(max_magnitude - max_magnitude / f64::from(self.viewport.height) * y)
    }

    pub fn axis_labels(self) -> TimelineResult<AxisLabels> {
        let start = self
            .store
            .marker(self.store.start_marker())
            .map(|marker| marker.value())
            .ok_or(TimelineError::UnknownMarker(self.store.start_marker().raw()))?;
        Ok(AxisLabels {
            start,
            stop: self.max_time()?,
            max_magnitude: self.max_magnitude()?,
        })
    }
}

fn ensure_finite(value: f64, field_name: &str) -> TimelineResult<()> {
    if !value.is_finite() {
        return Err(TimelineError::InvalidInput(format!(
            "{field_name} must be finite"
        )));
    }
    Ok(())
}

fn non_degenerate(extent: f64, axis: &'static str) -> TimelineResult<f64> {
    if !extent.is_finite() || extent == 0.0 {
        return Err(TimelineError::DegenerateAxis { axis });
    }
    Ok(extent)
}

#[cfg(test)]
mod tests {
    use super::CoordinateMapper;
    use crate::core::{EntityStore, Viewport};
    use crate::error::TimelineError;

    #[test]
    fn mapper_without_values_reports_empty_model() {
        let mut store = EntityStore::seeded(0.0, 1000.0, "Initial", 1.0);
        let value = store.value_named("Initial").expect("seed value");
        store.remove_value(value);

        let mapper = CoordinateMapper::new(&store, Viewport::default(), 1.25);
        assert_eq!(mapper.max_magnitude(), Err(TimelineError::EmptyModel));
        assert_eq!(mapper.magnitude_to_y(1.0), Err(TimelineError::EmptyModel));
        assert!(mapper.time_to_x(500.0).is_ok());
    }

    #[test]
    fn zero_magnitude_extent_only_blocks_the_forward_mapping() {
        let store = EntityStore::seeded(0.0, 1000.0, "Initial", 0.0);
        let mapper = CoordinateMapper::new(&store, Viewport::default(), 1.25);
        assert_eq!(
            mapper.magnitude_to_y(0.0),
            Err(TimelineError::DegenerateAxis { axis: "magnitude" })
        );
        assert_eq!(mapper.y_to_magnitude(10.0), Ok(0.0));
        assert_eq!(mapper.y_to_magnitude(200.0), Ok(0.0));
    }
}
