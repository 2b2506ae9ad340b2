//! Action descriptor → dispatch translation.
//!
//! # Flow
//!
//! ```text
//! descriptors ──→ build_event_handlers ──→ EventHandlers ──(user event)──┐
//!      │                                                                 ▼
//!      └────────→ fire_triggers_of_kind ───────────────────────→ evaluate
//!                                                                   │
//!                              ┌────────────────────────────────────┼──────────────┐
//!                              ▼                                    ▼              ▼
//!                       PollRegistry::cancel              PollRegistry::start   DispatchSink
//! ```

mod completion;
mod dispatcher;
mod error;
mod handlers;
mod sink;

pub use completion::Completion;
pub use dispatcher::{
    build_event_handlers, fire_triggers_of_kind, has_matching_trigger, ActionDispatcher,
};
pub use error::DispatchError;
pub use handlers::{EventHandler, EventHandlers};
pub use sink::{AckChannelSink, AsyncSink, ChannelSink, DispatchSink, StoreRequest};
