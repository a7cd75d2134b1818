use tracing::warn;

use crate::error::{TimelineError, TimelineResult};
use crate::extensions::TimelineObserver;

use super::TimelineEngine;

impl TimelineEngine {
    /// Registers an observer with unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn TimelineObserver>) -> TimelineResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            warn!("rejecting observer with empty id");
            return Err(TimelineError::Observer(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            warn!(observer = %observer_id, "rejecting duplicate observer id");
            return Err(TimelineError::Observer(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }
}
