use serde::{Deserialize, Serialize};

use super::TimelineEngine;

/// Redraw path a host subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    /// Marker, value and duration lines on the canvas.
    Canvas,
    /// Start/stop time and max magnitude labels.
    AxisLabels,
    /// The textual list of markers, values and durations.
    EntityList,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Canvas => 1 << 0,
            Self::AxisLabels => 1 << 1,
            Self::EntityList => 1 << 2,
        }
    }
}

/// Bitmask of invalidation topics accumulated across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationTopics {
    bits: u8,
}

impl InvalidationTopics {
    const ALL_BITS: u8 = InvalidationTopic::Canvas.bit()
        | InvalidationTopic::AxisLabels.bit()
        | InvalidationTopic::EntityList.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    /// Canvas plus axis labels, raised by drags.
    #[must_use]
    pub const fn geometry() -> Self {
        Self::from_topic(InvalidationTopic::Canvas).with_topic(InvalidationTopic::AxisLabels)
    }

    #[must_use]
    pub const fn from_topic(topic: InvalidationTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn with_topic(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.bits & other.bits) != 0
    }

    #[must_use]
    pub const fn contains_topic(self, topic: InvalidationTopic) -> bool {
        self.intersects(Self::from_topic(topic))
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

impl TimelineEngine {
    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationTopics {
        self.pending_invalidation
    }

    /// Returns and clears the topics invalidated since the last call.
    pub fn take_pending_invalidation(&mut self) -> InvalidationTopics {
        std::mem::take(&mut self.pending_invalidation)
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidationTopic, InvalidationTopics};

    #[test]
    fn geometry_covers_canvas_and_axis_labels_only() {
        let topics = InvalidationTopics::geometry();
        assert!(topics.contains_topic(InvalidationTopic::Canvas));
        assert!(topics.contains_topic(InvalidationTopic::AxisLabels));
        assert!(!topics.contains_topic(InvalidationTopic::EntityList));
    }

    #[test]
    fn union_accumulates_topics() {
        let topics = InvalidationTopics::none()
            .union(InvalidationTopics::from_topic(InvalidationTopic::EntityList))
            .union(InvalidationTopics::geometry());
        assert_eq!(topics, InvalidationTopics::all());
        assert!(InvalidationTopics::none().is_none());
    }
}
