//! Per-name poll lifecycle as a pure reducer.

use crate::mvi::{Intent, Reducer, State};

/// Lifecycle of one action name in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollState {
    /// No poll has run, or the last one ended and the name may start again.
    #[default]
    Idle,
    /// A loop is running for this name.
    Polling { generation: u64 },
    /// The name was cancelled and may not start again.
    Stopped { generation: u64 },
}

impl State for PollState {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollIntent {
    Start { generation: u64 },
    Cancel,
    /// The loop with this generation exited on its own.
    Finished { generation: u64 },
}

impl Intent for PollIntent {}

/// Transition rules. `restart_after_cancel` decides whether a cancelled name
/// goes back to `Idle` or stays `Stopped` for good.
#[derive(Debug, Clone, Copy)]
pub struct PollLifecycle {
    pub restart_after_cancel: bool,
}

impl PollLifecycle {
    fn ended(&self, generation: u64) -> PollState {
        if self.restart_after_cancel {
            PollState::Idle
        } else {
            PollState::Stopped { generation }
        }
    }
}

impl Reducer for PollLifecycle {
    type State = PollState;
    type Intent = PollIntent;

    fn reduce(&self, state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PollIntent::Start { generation } => match state {
                PollState::Idle => PollState::Polling { generation },
                PollState::Stopped { .. } if self.restart_after_cancel => {
                    PollState::Polling { generation }
                }
                // Duplicate start, or a terminal name: keep what is there.
                other => other,
            },

            PollIntent::Cancel => match state {
                PollState::Polling { generation } => self.ended(generation),
                other => other,
            },

            PollIntent::Finished { generation } => match state {
                PollState::Polling { generation: current } if current == generation => {
                    self.ended(generation)
                }
                other => other,
            },
        }
    }
}
