use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            #[must_use]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

entity_id!(
    /// Handle of a [`TimeMarker`](super::TimeMarker) in the store.
    MarkerId
);
entity_id!(
    /// Handle of a [`ValuePoint`](super::ValuePoint) in the store.
    ///
    /// Durations hold this handle, so several durations may share one value.
    ValueId
);
entity_id!(
    /// Handle of a [`Duration`](super::Duration) in the store.
    DurationId
);

/// The three independent name spaces of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Marker,
    Value,
    Duration,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Marker => "marker",
            Self::Value => "value",
            Self::Duration => "duration",
        };
        f.write_str(label)
    }
}

/// Handle of any entity, tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Marker(MarkerId),
    Value(ValueId),
    Duration(DurationId),
}

impl EntityRef {
    #[must_use]
    pub const fn kind(self) -> EntityKind {
        match self {
            Self::Marker(_) => EntityKind::Marker,
            Self::Value(_) => EntityKind::Value,
            Self::Duration(_) => EntityKind::Duration,
        }
    }
}
