use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Cooperative cancellation token for one poll run.
///
/// Each run gets a fresh token stamped with the registry generation that
/// started it, so a late-finishing loop can never be mistaken for a newer run
/// of the same action name.
#[derive(Clone, Debug)]
pub struct PollToken {
    inner: Arc<TokenInner>,
}

#[derive(Debug)]
struct TokenInner {
    cancelled: AtomicBool,
    generation: u64,
    notify: Notify,
}

impl PollToken {
    pub(crate) fn new(generation: u64) -> Self {
        Self {
            inner: Arc::new(TokenInner {
                cancelled: AtomicBool::new(false),
                generation,
                notify: Notify::new(),
            }),
        }
    }

    pub fn generation(&self) -> u64 {
        self.inner.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Request cancellation. Returns `false` if it was already requested.
    pub fn cancel(&self) -> bool {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.inner.notify.notify_waiters();
        true
    }

    /// Resolve once cancellation has been requested.
    pub async fn cancelled(&self) {
        // Register interest before checking the flag so a cancel() between
        // the check and the await is not lost.
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn starts_uncancelled_with_generation() {
        let token = PollToken::new(7);
        assert!(!token.is_cancelled());
        assert_eq!(token.generation(), 7);
    }

    #[test]
    fn cancel_is_reported_once() {
        let token = PollToken::new(1);
        assert!(token.cancel());
        assert!(!token.cancel());
        assert!(token.clone().is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_returns_immediately_when_already_set() {
        let token = PollToken::new(1);
        token.cancel();
        tokio::time::timeout(Duration::from_millis(100), token.cancelled())
            .await
            .expect("should not wait");
    }

    #[tokio::test]
    async fn cancelled_wakes_waiting_task() {
        let token = PollToken::new(1);
        let waiter = token.clone();
        let task = tokio::spawn(async move { waiter.cancelled().await });
        tokio::task::yield_now().await;
        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("woken")
            .expect("joined");
    }
}
