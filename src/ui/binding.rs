use std::sync::Arc;

use crate::action::{ActionDescriptor, DispatchMessage};
use crate::dispatch::{
    build_event_handlers, fire_triggers_of_kind, has_matching_trigger, ActionDispatcher,
    Completion, DispatchError, EventHandlers,
};
use crate::trigger::Trigger;
use crate::ui::UiEvent;

/// The action wiring of one visual component instance.
///
/// Holds the component's descriptor list and the handlers derived from it.
/// Handlers are rebuilt whenever a different list is supplied, never cached
/// across lists.
pub struct ActionBinding {
    dispatcher: ActionDispatcher,
    actions: Arc<[ActionDescriptor]>,
    handlers: EventHandlers,
    mounted: bool,
}

impl ActionBinding {
    pub fn new(dispatcher: ActionDispatcher, actions: Arc<[ActionDescriptor]>) -> Self {
        let handlers = build_event_handlers(&actions, &dispatcher);
        Self {
            dispatcher,
            actions,
            handlers,
            mounted: false,
        }
    }

    pub fn actions(&self) -> &Arc<[ActionDescriptor]> {
        &self.actions
    }

    pub fn handlers(&self) -> &EventHandlers {
        &self.handlers
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Fire the component's `onload` descriptors. Only the first call fires.
    pub fn mount(&mut self) -> Completion {
        if self.mounted {
            return Completion::done();
        }
        self.mounted = true;
        fire_triggers_of_kind(&self.actions, &Trigger::Load, &self.dispatcher)
    }

    /// Swap in a new descriptor list.
    ///
    /// The comparison is by reference: the same `Arc` is a no-op even if its
    /// contents would compare equal to something else. Returns whether the
    /// handlers were rebuilt.
    pub fn update(&mut self, actions: Arc<[ActionDescriptor]>) -> bool {
        if Arc::ptr_eq(&self.actions, &actions) {
            return false;
        }
        self.handlers = build_event_handlers(&actions, &self.dispatcher);
        self.actions = actions;
        true
    }

    /// Deliver a UI event. `None` when nothing is bound to its kind.
    pub fn handle(&self, event: &mut dyn UiEvent) -> Option<Completion> {
        self.handlers.invoke(event)
    }

    pub fn wants(&self, trigger: &Trigger) -> bool {
        has_matching_trigger(&self.actions, trigger)
    }

    pub fn fire(&self, kind: &Trigger) -> Completion {
        fire_triggers_of_kind(&self.actions, kind, &self.dispatcher)
    }

    /// Dispatch `message`, wait until the store has applied it, then fire
    /// `then`. Used for "set the field value, then run on-change".
    pub async fn dispatch_then_fire(
        &self,
        message: DispatchMessage,
        then: Trigger,
    ) -> Result<(), DispatchError> {
        self.dispatcher.sink().dispatch(message).await?;
        self.fire(&then).await
    }
}
