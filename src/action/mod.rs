//! Action descriptors and the messages they turn into.

mod descriptor;
mod message;
mod name;

pub use descriptor::ActionDescriptor;
pub use message::DispatchMessage;
pub use name::{normalize_action_name, WhitespaceStyle};
