//! Poll registry: named, repeating, cooperatively cancelled dispatches.
//!
//! The registry is an ordinary value held by the
//! [`ActionDispatcher`](crate::dispatch::ActionDispatcher), not a global, so
//! every test can build an isolated one.

mod lifecycle;
mod registry;
mod token;

pub use lifecycle::{PollIntent, PollLifecycle, PollState};
pub use registry::{PollRegistry, PollStart};
pub use token::PollToken;
