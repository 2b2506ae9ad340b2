use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::lifecycle::{PollIntent, PollLifecycle, PollState};
use super::token::PollToken;
use crate::action::DispatchMessage;
use crate::config::PollingConfig;
use crate::dispatch::{Completion, DispatchError, DispatchSink};
use crate::mvi::Reducer;

/// Upper bound for a poll period, so the first boundary stays representable.
const MAX_PERIOD: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Outcome of [`PollRegistry::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStart {
    Started { generation: u64 },
    /// A poll for this name is already running; it was left untouched.
    AlreadyPolling,
    /// The name was cancelled earlier and restarts are disabled.
    Stopped,
    /// Called outside a tokio runtime. The first tick was dispatched but
    /// nothing repeats.
    NoRuntime,
}

/// Registry of named repeating dispatches.
///
/// At most one poll runs per normalized action name. Any holder of a clone
/// may start or stop any name; there is no per-component ownership.
#[derive(Clone)]
pub struct PollRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    polls: Mutex<Polls>,
    lifecycle: PollLifecycle,
    min_period: Duration,
    next_generation: AtomicU64,
}

#[derive(Default)]
struct Polls {
    entries: HashMap<String, PollEntry>,
    /// Cancelled loops that may still be winding down.
    retiring: Vec<JoinHandle<()>>,
}

struct PollEntry {
    state: PollState,
    token: PollToken,
    task: Option<JoinHandle<()>>,
}

impl Default for PollRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PollRegistry {
    pub fn new() -> Self {
        Self::from_config(&PollingConfig::default())
    }

    pub fn from_config(config: &PollingConfig) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                polls: Mutex::new(Polls::default()),
                lifecycle: PollLifecycle {
                    restart_after_cancel: config.restart_after_cancel,
                },
                min_period: Duration::from_millis(config.min_period_ms),
                next_generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn state(&self, name: &str) -> PollState {
        self.inner
            .polls
            .lock()
            .entries
            .get(name)
            .map(|entry| entry.state)
            .unwrap_or_default()
    }

    pub fn is_polling(&self, name: &str) -> bool {
        matches!(self.state(name), PollState::Polling { .. })
    }

    /// Names with a running poll, sorted.
    pub fn active_names(&self) -> Vec<String> {
        let polls = self.inner.polls.lock();
        let mut names: Vec<String> = polls
            .entries
            .iter()
            .filter(|(_, entry)| matches!(entry.state, PollState::Polling { .. }))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Start polling `name`: dispatch `{type: name}` now and after every
    /// `period` until cancelled.
    ///
    /// The first dispatch happens before `start` returns, so it keeps its
    /// place among the dispatches of the same evaluation pass. Later ticks
    /// run on a tokio task.
    ///
    /// A second start for a running name is a caller error. It is logged and
    /// ignored, and the running poll is kept.
    pub fn start(&self, name: &str, sink: Arc<dyn DispatchSink>, period: Duration) -> PollStart {
        let period = period.max(self.inner.min_period).min(MAX_PERIOD);
        let runtime = Handle::try_current().ok();
        let generation = self.inner.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = PollToken::new(generation);

        {
            let mut polls = self.inner.polls.lock();
            polls.retiring.retain(|task| !task.is_finished());

            let current = polls
                .entries
                .get(name)
                .map(|entry| entry.state)
                .unwrap_or_default();
            let next = self
                .inner
                .lifecycle
                .reduce(current, PollIntent::Start { generation });

            match next {
                PollState::Polling { generation: started } if started == generation => {}
                PollState::Polling { .. } => {
                    tracing::warn!(action = %name, "Poll already running, ignoring duplicate start");
                    return PollStart::AlreadyPolling;
                }
                _ => {
                    tracing::warn!(action = %name, "Poll was stopped and cannot be restarted");
                    return PollStart::Stopped;
                }
            }

            if runtime.is_some() {
                let previous = polls.entries.insert(
                    name.to_string(),
                    PollEntry {
                        state: next,
                        token: token.clone(),
                        task: None,
                    },
                );
                if let Some(task) = previous.and_then(|entry| entry.task) {
                    polls.retiring.push(task);
                }
            }
        }

        // Outside the lock: the sink may call back into the registry.
        let first = sink.dispatch(DispatchMessage::tick(name));

        let Some(runtime) = runtime else {
            tracing::warn!(
                action = %name,
                "No async runtime available, dispatched once without polling"
            );
            return PollStart::NoRuntime;
        };

        if let Completion::Ready(Err(err)) = &first {
            tracing::error!(
                action = %name,
                error = %err,
                "Polled dispatch failed, stopping poll"
            );
            self.inner.finish(name, generation);
            return PollStart::Started { generation };
        }

        let task = runtime.spawn(run_poll(
            PollLoop {
                name: name.to_string(),
                token,
                sink,
                period,
                registry: Arc::downgrade(&self.inner),
            },
            first,
        ));

        {
            let mut polls = self.inner.polls.lock();
            match polls.entries.get_mut(name) {
                Some(entry) if entry.token.generation() == generation => entry.task = Some(task),
                // Cancelled from inside the first dispatch.
                _ => polls.retiring.push(task),
            }
        }

        tracing::info!(
            action = %name,
            period_ms = period.as_millis() as u64,
            generation,
            "Poll started"
        );
        PollStart::Started { generation }
    }

    /// Stop polling `name`.
    ///
    /// Cooperative: a dispatch already under way is not retracted, the loop
    /// just never schedules another one. Returns `false` (and logs) when no
    /// poll is running under that name.
    pub fn cancel(&self, name: &str) -> bool {
        let mut polls = self.inner.polls.lock();

        let Some(entry) = polls.entries.get_mut(name) else {
            tracing::warn!(action = %name, "No poll running, ignoring stop");
            return false;
        };
        if !matches!(entry.state, PollState::Polling { .. }) {
            tracing::warn!(action = %name, "Poll already stopped, ignoring stop");
            return false;
        }

        entry.token.cancel();
        entry.state = self.inner.lifecycle.reduce(entry.state, PollIntent::Cancel);
        let generation = entry.token.generation();
        let now_idle = entry.state == PollState::Idle;

        if now_idle {
            if let Some(task) = polls.entries.remove(name).and_then(|entry| entry.task) {
                polls.retiring.push(task);
            }
        }

        tracing::info!(action = %name, generation, "Poll cancelled");
        true
    }

    /// Cancel every running poll. Returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        self.active_names()
            .iter()
            .filter(|name| self.cancel(name))
            .count()
    }

    /// Cancel every poll and wait for the loops to exit.
    pub async fn shutdown(&self) {
        let cancelled = self.cancel_all();

        let tasks: Vec<JoinHandle<()>> = {
            let mut polls = self.inner.polls.lock();
            let mut tasks: Vec<_> = polls.retiring.drain(..).collect();
            tasks.extend(polls.entries.values_mut().filter_map(|entry| entry.task.take()));
            tasks
        };

        tracing::debug!(cancelled, waiting = tasks.len(), "Poll registry shutting down");
        for task in tasks {
            let _ = task.await;
        }
    }
}

impl RegistryInner {
    /// Called by a loop that exited. Ignored unless that loop's run is still
    /// the one registered under `name`.
    fn finish(&self, name: &str, generation: u64) {
        let mut polls = self.polls.lock();
        let Some(entry) = polls.entries.get_mut(name) else {
            return;
        };

        let next = self
            .lifecycle
            .reduce(entry.state, PollIntent::Finished { generation });
        if next == entry.state {
            return;
        }
        entry.state = next;
        if next == PollState::Idle {
            polls.entries.remove(name);
        }
    }
}

struct PollLoop {
    name: String,
    token: PollToken,
    sink: Arc<dyn DispatchSink>,
    period: Duration,
    registry: Weak<RegistryInner>,
}

/// Drives one poll after its first dispatch went out from `start`.
async fn run_poll(poll: PollLoop, first: Completion) {
    let outcome = match first.await {
        Ok(()) => tick_until_cancelled(&poll).await,
        Err(err) => Err(err),
    };

    if let Err(err) = outcome {
        tracing::error!(
            action = %poll.name,
            error = %err,
            "Polled dispatch failed, stopping poll"
        );
    }

    if let Some(inner) = poll.registry.upgrade() {
        inner.finish(&poll.name, poll.token.generation());
    }
    tracing::debug!(action = %poll.name, generation = poll.token.generation(), "Poll loop exited");
}

async fn tick_until_cancelled(poll: &PollLoop) -> Result<(), DispatchError> {
    let mut ticker = tokio::time::interval_at(Instant::now() + poll.period, poll.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = poll.token.cancelled() => return Ok(()),
            _ = ticker.tick() => {}
        }

        if poll.token.is_cancelled() || poll.registry.strong_count() == 0 {
            return Ok(());
        }

        tracing::trace!(action = %poll.name, "Poll tick");
        poll.sink.dispatch(DispatchMessage::tick(poll.name.clone())).await?;
    }
}
