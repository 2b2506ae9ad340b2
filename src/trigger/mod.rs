//! Trigger vocabulary.
//!
//! Components declare interest in abstract triggers (`"onclick"`, `"onload"`,
//! ...). Bindable triggers resolve to a concrete [`DomEvent`] that a rendered
//! element can attach a handler to; lifecycle triggers never resolve and are
//! fired programmatically instead.

mod vocabulary;

pub use vocabulary::{DomEvent, Trigger, TriggerCategory};
