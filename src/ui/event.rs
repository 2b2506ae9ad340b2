use crate::trigger::DomEvent;

/// An event delivered to a rendered element's handler.
pub trait UiEvent {
    fn kind(&self) -> DomEvent;

    /// Suppress the platform's default behavior for this event.
    fn prevent_default(&mut self);

    fn is_default_prevented(&self) -> bool;
}

/// A minimal [`UiEvent`] for hosts that have no native event object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticEvent {
    kind: DomEvent,
    default_prevented: bool,
}

impl SyntheticEvent {
    pub fn new(kind: DomEvent) -> Self {
        Self {
            kind,
            default_prevented: false,
        }
    }
}

impl UiEvent for SyntheticEvent {
    fn kind(&self) -> DomEvent {
        self.kind
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
