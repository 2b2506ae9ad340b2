use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::completion::Completion;
use crate::trigger::DomEvent;
use crate::ui::UiEvent;

/// A handler installed on a rendered element for one event.
pub type EventHandler = Arc<dyn Fn(&mut dyn UiEvent) -> Completion + Send + Sync>;

/// Event-name → handler map produced by
/// [`build_event_handlers`](super::build_event_handlers).
#[derive(Clone, Default)]
pub struct EventHandlers {
    handlers: BTreeMap<DomEvent, EventHandler>,
}

impl EventHandlers {
    pub(crate) fn insert(&mut self, event: DomEvent, handler: EventHandler) {
        self.handlers.insert(event, handler);
    }

    pub fn get(&self, event: DomEvent) -> Option<&EventHandler> {
        self.handlers.get(&event)
    }

    pub fn contains(&self, event: DomEvent) -> bool {
        self.handlers.contains_key(&event)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Installed events in a stable order.
    pub fn events(&self) -> impl Iterator<Item = DomEvent> + '_ {
        self.handlers.keys().copied()
    }

    /// Route an event to its handler. `None` when nothing is bound to it.
    pub fn invoke(&self, event: &mut dyn UiEvent) -> Option<Completion> {
        let handler = self.handlers.get(&event.kind())?;
        Some(handler(event))
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.handlers.keys().map(|event| event.as_str()))
            .finish()
    }
}
