use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{EditOutcome, IgnoreReason, TimelineEngine};
use crate::core::{DurationId, EntityRef, MarkerId, ValueId};
use crate::error::{TimelineError, TimelineResult};

/// What activating a target on the canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EditMode {
    /// Activating a marker, value or duration starts dragging it.
    #[default]
    Select,
    /// Activating empty canvas inserts a marker named after the pending name.
    AddMarker,
    /// Activating an entity renames it to the pending name.
    Rename,
    /// Activating a marker deletes it.
    DeleteMarker,
    /// Activating a duration gives it a new value named after the pending name.
    NewValue,
    /// Two activations merge the second target with the first.
    Merge,
}

/// Thing under the pointer when a target is activated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EditTarget {
    Marker(MarkerId),
    Value(ValueId),
    Duration(DurationId),
    /// Empty canvas at display coordinate `x`.
    Canvas { x: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTarget {
    Marker(MarkerId),
    Value(ValueId),
}

/// What the session did with an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// An engine edit ran, applied or silently discarded.
    Edit(EditOutcome),
    /// Subsequent pointer moves drag this target.
    DragStarted(DragTarget),
    /// First half of a merge; the next activation completes it.
    MergeSourceSelected(EntityRef),
    /// The mode has no action for this target; state is unchanged.
    NotApplicable,
}

/// Edit-mode state machine driving a [`TimelineEngine`] from canvas input.
///
/// The session is an explicit value holding the mode, the pending name typed
/// by the user, the first target of a merge, and the active drag. Hosts feed
/// it mode switches, activations and pointer events; it routes each to one
/// engine operation.
///
/// Terminal actions (insert, rename, delete, new value, merge) return to
/// [`EditMode::Select`] whether or not the engine accepted them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditSession {
    mode: EditMode,
    pending_name: String,
    merge_source: Option<EntityRef>,
    drag: Option<DragTarget>,
}

impl EditSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Mode-switch command. Only forgets a half-finished merge.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
        self.merge_source = None;
    }

    #[must_use]
    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    pub fn set_pending_name(&mut self, name: impl Into<String>) {
        self.pending_name = name.into();
    }

    #[must_use]
    pub fn merge_source(&self) -> Option<EntityRef> {
        self.merge_source
    }

    #[must_use]
    pub fn drag(&self) -> Option<DragTarget> {
        self.drag
    }

    /// Routes an activated target to the engine according to the mode.
    ///
    /// Any activation ends the current drag.
    pub fn activate(
        &mut self,
        engine: &mut TimelineEngine,
        target: EditTarget,
    ) -> TimelineResult<SessionOutcome> {
        self.drag = None;
        debug!(mode = ?self.mode, target = ?target, "activate target");

        match (self.mode, target) {
            (EditMode::AddMarker, EditTarget::Canvas { x }) => {
                let time = engine.mapper().x_to_time(x);
                let result = time.and_then(|time| engine.insert_marker(&self.pending_name, time));
                self.finish(result.map(|_| EditOutcome::Applied))
            }
            (EditMode::Rename, EditTarget::Marker(marker)) => {
                let result = engine.rename_marker(marker, &self.pending_name);
                self.finish(result)
            }
            (EditMode::Rename, EditTarget::Value(value)) => {
                let result = engine.rename_value(value, &self.pending_name);
                self.finish(result)
            }
            (EditMode::Rename, EditTarget::Duration(duration)) => {
                let result = engine.rename_duration(duration, &self.pending_name);
                self.finish(result)
            }
            (EditMode::DeleteMarker, EditTarget::Marker(marker)) => {
                let result = engine.delete_marker(marker);
                self.finish(result.map(|_| EditOutcome::Applied))
            }
            (EditMode::NewValue, EditTarget::Duration(duration)) => {
                let result = engine.assign_new_value(duration, &self.pending_name);
                self.finish(result.map(|_| EditOutcome::Applied))
            }
            (EditMode::Merge, EditTarget::Value(value)) => {
                self.merge_step(engine, EntityRef::Value(value))
            }
            (EditMode::Merge, EditTarget::Duration(duration)) => {
                self.merge_step(engine, EntityRef::Duration(duration))
            }
            (EditMode::Select, EditTarget::Marker(marker)) => {
                Ok(self.start_drag(DragTarget::Marker(marker)))
            }
            (EditMode::Select, EditTarget::Value(value)) => {
                Ok(self.start_drag(DragTarget::Value(value)))
            }
            (EditMode::Select, EditTarget::Duration(duration)) => {
                let value = engine.fork_value_for_duration(duration)?;
                Ok(self.start_drag(DragTarget::Value(value)))
            }
            _ => Ok(SessionOutcome::NotApplicable),
        }
    }

    /// Applies the active drag at display position `(x, y)`.
    pub fn pointer_move(
        &mut self,
        engine: &mut TimelineEngine,
        x: f64,
        y: f64,
    ) -> TimelineResult<EditOutcome> {
        match self.drag {
            None => Ok(EditOutcome::Ignored(IgnoreReason::NoDrag)),
            Some(DragTarget::Marker(marker)) => {
                let time = engine.mapper().x_to_time(x)?;
                engine.move_marker(marker, time)
            }
            Some(DragTarget::Value(value)) => {
                let magnitude = engine.mapper().y_to_magnitude(y)?;
                engine.move_value(value, magnitude)
            }
        }
    }

    /// Ends the active drag.
    pub fn pointer_release(&mut self) {
        self.drag = None;
    }

    fn start_drag(&mut self, target: DragTarget) -> SessionOutcome {
        self.drag = Some(target);
        SessionOutcome::DragStarted(target)
    }

    fn finish(&mut self, result: TimelineResult<EditOutcome>) -> TimelineResult<SessionOutcome> {
        self.mode = EditMode::Select;
        self.merge_source = None;
        result.map(SessionOutcome::Edit)
    }

    fn merge_step(
        &mut self,
        engine: &mut TimelineEngine,
        target: EntityRef,
    ) -> TimelineResult<SessionOutcome> {
        let Some(source) = self.merge_source else {
            self.merge_source = Some(target);
            return Ok(SessionOutcome::MergeSourceSelected(target));
        };
        if source == target {
            return Ok(SessionOutcome::Edit(EditOutcome::Ignored(
                IgnoreReason::SameTarget,
            )));
        }

        let result = match (source, target) {
            (EntityRef::Value(source), EntityRef::Value(target)) => {
                engine.merge_values(target, source)
            }
            (EntityRef::Duration(source), EntityRef::Value(target)) => {
                engine.assign_value(source, target)
            }
            (EntityRef::Value(source), EntityRef::Duration(target)) => {
                engine.assign_value(target, source)
            }
            (EntityRef::Duration(source), EntityRef::Duration(target)) => engine
                .store()
                .duration(source)
                .map(|duration| duration.value())
                .ok_or(TimelineError::UnknownDuration(source.raw()))
                .and_then(|value| engine.assign_value(target, value)),
            _ => return Ok(SessionOutcome::NotApplicable),
        };
        self.finish(result)
    }
}
