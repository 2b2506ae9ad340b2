use std::sync::Arc;

use crate::action::ActionDescriptor;
use crate::dispatch::{fire_triggers_of_kind, ActionDispatcher, Completion};
use crate::trigger::Trigger;

/// Route-level consumer: fires `onlocationchange` when the location changes.
///
/// The initial location is taken as given and does not fire.
pub struct RouteWatcher {
    dispatcher: ActionDispatcher,
    actions: Arc<[ActionDescriptor]>,
    location: String,
}

impl RouteWatcher {
    pub fn new(
        dispatcher: ActionDispatcher,
        actions: Arc<[ActionDescriptor]>,
        initial: impl Into<String>,
    ) -> Self {
        Self {
            dispatcher,
            actions,
            location: initial.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_actions(&mut self, actions: Arc<[ActionDescriptor]>) {
        self.actions = actions;
    }

    pub fn navigate(&mut self, location: impl Into<String>) -> Completion {
        let location = location.into();
        if location == self.location {
            tracing::trace!(location = %location, "Location unchanged");
            return Completion::done();
        }

        tracing::debug!(from = %self.location, to = %location, "Location changed");
        self.location = location;
        fire_triggers_of_kind(&self.actions, &Trigger::LocationChange, &self.dispatcher)
    }
}
