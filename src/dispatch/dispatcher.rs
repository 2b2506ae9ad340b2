//! Translation of action descriptors into handlers and dispatches.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::completion::Completion;
use super::handlers::{EventHandler, EventHandlers};
use super::sink::DispatchSink;
use crate::action::{normalize_action_name, ActionDescriptor, DispatchMessage, WhitespaceStyle};
use crate::config::Config;
use crate::poll::PollRegistry;
use crate::trigger::{DomEvent, Trigger};
use crate::ui::UiEvent;

/// The composition root shared by every component: a dispatch sink, the poll
/// registry, and the naming rule that turns action names into type tags.
///
/// Cloning is cheap; clones share the same sink and registry.
#[derive(Clone)]
pub struct ActionDispatcher {
    sink: Arc<dyn DispatchSink>,
    registry: PollRegistry,
    whitespace: WhitespaceStyle,
}

impl ActionDispatcher {
    pub fn new(sink: Arc<dyn DispatchSink>, registry: PollRegistry) -> Self {
        Self {
            sink,
            registry,
            whitespace: WhitespaceStyle::default(),
        }
    }

    /// Build a dispatcher with a fresh registry configured from `config`.
    pub fn from_config(sink: Arc<dyn DispatchSink>, config: &Config) -> Self {
        Self {
            sink,
            registry: PollRegistry::from_config(&config.polling),
            whitespace: config.naming.whitespace,
        }
    }

    pub fn with_whitespace_style(mut self, style: WhitespaceStyle) -> Self {
        self.whitespace = style;
        self
    }

    pub fn registry(&self) -> &PollRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &Arc<dyn DispatchSink> {
        &self.sink
    }

    pub fn normalize(&self, action: &str) -> String {
        normalize_action_name(action, self.whitespace)
    }

    /// Evaluate one descriptor: cancel its poll, start its poll, or dispatch
    /// it once.
    pub fn evaluate(&self, descriptor: &ActionDescriptor) -> Completion {
        if descriptor.action.is_empty() {
            tracing::warn!(
                trigger = %descriptor.trigger,
                "Action descriptor has an empty action name, skipping"
            );
            return Completion::done();
        }

        let name = self.normalize(&descriptor.action);

        if descriptor.stop {
            self.registry.cancel(&name);
            return Completion::done();
        }

        if let Some(period) = descriptor.valid_polling_period() {
            self.registry.start(&name, Arc::clone(&self.sink), period);
            return Completion::done();
        }

        tracing::debug!(
            action = %name,
            trigger = %descriptor.trigger,
            "Dispatching action"
        );
        let message = DispatchMessage::action(
            name,
            descriptor.input_variables.clone(),
            descriptor.valid_timeout(),
        );
        self.sink.dispatch(message)
    }

    pub fn build_event_handlers(&self, actions: &[ActionDescriptor]) -> EventHandlers {
        build_event_handlers(actions, self)
    }

    pub fn fire_triggers_of_kind(&self, actions: &[ActionDescriptor], kind: &Trigger) -> Completion {
        fire_triggers_of_kind(actions, kind, self)
    }
}

/// Build the event-handler map for a descriptor list.
///
/// Every descriptor whose trigger resolves to an event is bound; descriptors
/// sharing an event run in list order from a single handler. A drop binding
/// also installs an `onDragOver` handler that only suppresses the default,
/// which is what makes the element a valid drop target.
pub fn build_event_handlers(
    actions: &[ActionDescriptor],
    dispatcher: &ActionDispatcher,
) -> EventHandlers {
    let mut grouped: BTreeMap<DomEvent, Vec<ActionDescriptor>> = BTreeMap::new();

    for descriptor in actions {
        match descriptor.trigger.event() {
            Some(event) => grouped.entry(event).or_default().push(descriptor.clone()),
            None => {
                tracing::trace!(trigger = %descriptor.trigger, "Trigger not bindable, skipping");
            }
        }
    }

    let wants_drop = grouped.contains_key(&DomEvent::Drop);
    let mut handlers = EventHandlers::default();

    for (event, descriptors) in grouped {
        let dispatcher = dispatcher.clone();
        let handler: EventHandler = Arc::new(move |ui_event: &mut dyn UiEvent| {
            ui_event.prevent_default();
            Completion::all(descriptors.iter().map(|d| dispatcher.evaluate(d)))
        });
        handlers.insert(event, handler);
    }

    if wants_drop {
        let drag_over: EventHandler = Arc::new(|ui_event: &mut dyn UiEvent| {
            ui_event.prevent_default();
            Completion::done()
        });
        handlers.insert(DomEvent::DragOver, drag_over);
    }

    handlers
}

/// Evaluate, right now and in list order, every descriptor whose trigger is
/// exactly `kind`. The vocabulary is not consulted.
pub fn fire_triggers_of_kind(
    actions: &[ActionDescriptor],
    kind: &Trigger,
    dispatcher: &ActionDispatcher,
) -> Completion {
    Completion::all(
        actions
            .iter()
            .filter(|d| &d.trigger == kind)
            .map(|d| dispatcher.evaluate(d)),
    )
}

/// Whether any descriptor declares `kind`.
pub fn has_matching_trigger(actions: &[ActionDescriptor], kind: &Trigger) -> bool {
    actions.iter().any(|d| &d.trigger == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::SyntheticEvent;
    use parking_lot::Mutex;

    fn recording() -> (ActionDispatcher, Arc<Mutex<Vec<DispatchMessage>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let sink = move |msg: DispatchMessage| seen_clone.lock().push(msg);
        (ActionDispatcher::new(Arc::new(sink), PollRegistry::new()), seen)
    }

    #[test]
    fn empty_list_gives_empty_map() {
        let (dispatcher, _) = recording();
        assert!(dispatcher.build_event_handlers(&[]).is_empty());
    }

    #[test]
    fn lifecycle_and_unknown_triggers_are_not_bound() {
        let (dispatcher, _) = recording();
        let actions = vec![
            ActionDescriptor::new("onload", "a"),
            ActionDescriptor::new("onlocationchange", "b"),
            ActionDescriptor::new("onwiggle", "c"),
        ];
        assert!(dispatcher.build_event_handlers(&actions).is_empty());
    }

    #[test]
    fn one_click_runs_every_click_descriptor_in_order() {
        let (dispatcher, seen) = recording();
        let actions = vec![
            ActionDescriptor::new("onclick", "a"),
            ActionDescriptor::new("onfocus", "ignored"),
            ActionDescriptor::new("onclick", "b"),
        ];
        let handlers = dispatcher.build_event_handlers(&actions);
        assert_eq!(
            handlers.events().collect::<Vec<_>>(),
            vec![DomEvent::Click, DomEvent::Focus]
        );

        let mut event = SyntheticEvent::new(DomEvent::Click);
        let completion = handlers.invoke(&mut event).expect("click handler");
        assert!(matches!(completion, Completion::Ready(Ok(()))));
        assert!(event.is_default_prevented());

        let kinds: Vec<_> = seen.lock().iter().map(|m| m.kind.clone()).collect();
        assert_eq!(kinds, vec!["A", "B"]);
    }

    #[test]
    fn drop_binding_adds_drag_over() {
        let (dispatcher, seen) = recording();
        let handlers = dispatcher.build_event_handlers(&[ActionDescriptor::new("ondrop", "dropped")]);
        assert!(handlers.contains(DomEvent::Drop));
        assert!(handlers.contains(DomEvent::DragOver));
        assert_eq!(handlers.len(), 2);

        let mut over = SyntheticEvent::new(DomEvent::DragOver);
        handlers.invoke(&mut over).expect("drag over handler");
        assert!(over.is_default_prevented());
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn unbound_event_is_not_handled() {
        let (dispatcher, _) = recording();
        let handlers = dispatcher.build_event_handlers(&[ActionDescriptor::new("onclick", "a")]);
        let mut event = SyntheticEvent::new(DomEvent::KeyUp);
        assert!(handlers.invoke(&mut event).is_none());
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn one_shot_dispatch_carries_inputs_and_valid_timeout() {
        let (dispatcher, seen) = recording();
        let actions = vec![
            ActionDescriptor::new("onload", "save row")
                .with_input("row", serde_json::json!(3))
                .with_timeout(250.0),
            ActionDescriptor::new("onload", "no timeout").with_timeout(0.0),
        ];
        dispatcher.fire_triggers_of_kind(&actions, &Trigger::Load);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].kind, "SAVE_ROW");
        assert_eq!(seen[0].timeout, Some(250.0));
        assert_eq!(
            seen[0].input_variables.as_ref().and_then(|v| v.get("row")),
            Some(&serde_json::json!(3))
        );
        assert_eq!(seen[1].timeout, None);
        assert_eq!(seen[1].input_variables, Some(serde_json::Map::new()));
    }

    #[test]
    fn fire_matches_exact_trigger_only() {
        let (dispatcher, seen) = recording();
        let actions = vec![
            ActionDescriptor::new("onload", "a"),
            ActionDescriptor::new("onclick", "b"),
            ActionDescriptor::new("oncustom", "c"),
        ];
        dispatcher.fire_triggers_of_kind(&actions, &Trigger::parse("oncustom"));
        let kinds: Vec<_> = seen.lock().iter().map(|m| m.kind.clone()).collect();
        assert_eq!(kinds, vec!["C"]);
    }

    #[test]
    fn stop_for_idle_poll_dispatches_nothing() {
        let (dispatcher, seen) = recording();
        dispatcher.evaluate(&ActionDescriptor::new("onclick", "refresh").stopping());
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn poll_without_runtime_still_dispatches_first_tick() {
        let (dispatcher, seen) = recording();
        dispatcher.evaluate(&ActionDescriptor::new("onload", "refresh").polling_every(100.0));
        assert_eq!(*seen.lock(), vec![DispatchMessage::tick("REFRESH")]);
        assert!(!dispatcher.registry().is_polling("REFRESH"));
    }

    #[test]
    fn empty_action_name_is_skipped() {
        let (dispatcher, seen) = recording();
        dispatcher.evaluate(&ActionDescriptor::new("onclick", ""));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn has_matching_trigger_checks_declared_kinds() {
        let actions = vec![ActionDescriptor::new("onclick", "a")];
        assert!(has_matching_trigger(&actions, &Trigger::Click));
        assert!(!has_matching_trigger(&actions, &Trigger::Load));
    }

    #[test]
    fn per_character_style_is_honored() {
        let (dispatcher, seen) = recording();
        let dispatcher = dispatcher.with_whitespace_style(WhitespaceStyle::PerCharacter);
        dispatcher.evaluate(&ActionDescriptor::new("onclick", "a  b"));
        assert_eq!(seen.lock()[0].kind, "A__B");
    }
}
