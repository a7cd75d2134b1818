use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep display and seed settings next to their own
/// settings files. Every field has a default, so partial documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default = "default_start_time")]
    pub start_time: f64,
    #[serde(default = "default_stop_time")]
    pub stop_time: f64,
    #[serde(default = "default_initial_value_name")]
    pub initial_value_name: String,
    #[serde(default = "default_initial_magnitude")]
    pub initial_magnitude: f64,
    /// Factor applied to the largest magnitude to leave room above it.
    #[serde(default = "default_magnitude_headroom")]
    pub magnitude_headroom: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            start_time: default_start_time(),
            stop_time: default_stop_time(),
            initial_value_name: default_initial_value_name(),
            initial_magnitude: default_initial_magnitude(),
            magnitude_headroom: default_magnitude_headroom(),
        }
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn new(viewport: Viewport, start_time: f64, stop_time: f64) -> Self {
        Self {
            viewport,
            start_time,
            stop_time,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_initial_value(mut self, name: impl Into<String>, magnitude: f64) -> Self {
        self.initial_value_name = name.into();
        self.initial_magnitude = magnitude;
        self
    }

    #[must_use]
    pub fn with_magnitude_headroom(mut self, headroom: f64) -> Self {
        self.magnitude_headroom = headroom;
        self
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| TimelineError::InvalidConfig(format!("failed to parse config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            TimelineError::InvalidConfig(format!("failed to serialize config: {err}"))
        })
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.start_time.is_finite() || !self.stop_time.is_finite() {
            return Err(TimelineError::InvalidConfig(
                "start and stop times must be finite".to_owned(),
            ));
        }
        if self.start_time >= self.stop_time {
            return Err(TimelineError::InvalidConfig(
                "start time must be < stop time".to_owned(),
            ));
        }
        if self.stop_time == 0.0 {
            return Err(TimelineError::InvalidConfig(
                "stop time must be non-zero".to_owned(),
            ));
        }
        if self.initial_value_name.is_empty() {
            return Err(TimelineError::InvalidConfig(
                "initial value name must not be empty".to_owned(),
            ));
        }
        if !self.initial_magnitude.is_finite() {
            return Err(TimelineError::InvalidConfig(
                "initial magnitude must be finite".to_owned(),
            ));
        }
        if !self.magnitude_headroom.is_finite() || self.magnitude_headroom <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "magnitude headroom must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_start_time() -> f64 {
    0.0
}

fn default_stop_time() -> f64 {
    1000.0
}

fn default_initial_value_name() -> String {
    "Initial".to_owned()
}

fn default_initial_magnitude() -> f64 {
    1.0
}

fn default_magnitude_headroom() -> f64 {
    1.25
}
