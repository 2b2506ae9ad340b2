//! Intent/reducer primitives.
//!
//! State transitions are expressed as pure reductions; whoever owns the state
//! performs the side effects around the call.
//!
//! ```text
//! Intent ──→ Reducer ──→ State
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::State;
