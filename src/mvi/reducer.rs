use super::intent::Intent;
use super::state::State;

/// Transforms state based on intents.
///
/// The reducer is the only place transitions are decided. `reduce` must stay
/// pure; a reducer may carry policy (`&self`) but no mutable state.
pub trait Reducer {
    type State: State;
    type Intent: Intent;

    fn reduce(&self, state: Self::State, intent: Self::Intent) -> Self::State;
}
