//! Dispatch sinks: the boundary to the external store.

use std::future::Future;

use tokio::sync::{mpsc, oneshot};

use super::completion::Completion;
use super::error::DispatchError;
use crate::action::DispatchMessage;

/// Receives normalized messages on behalf of the external store.
///
/// The engine treats a sink as opaque and side-effecting. It makes no
/// assumption about the sink's own concurrency.
pub trait DispatchSink: Send + Sync {
    fn dispatch(&self, message: DispatchMessage) -> Completion;
}

/// Plain closures are fire-and-forget sinks.
impl<F> DispatchSink for F
where
    F: Fn(DispatchMessage) + Send + Sync,
{
    fn dispatch(&self, message: DispatchMessage) -> Completion {
        self(message);
        Completion::done()
    }
}

/// Wraps a closure that returns a future, for stores that complete later.
pub struct AsyncSink<F> {
    f: F,
}

impl<F, Fut> AsyncSink<F>
where
    F: Fn(DispatchMessage) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), DispatchError>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut> DispatchSink for AsyncSink<F>
where
    F: Fn(DispatchMessage) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), DispatchError>> + Send + 'static,
{
    fn dispatch(&self, message: DispatchMessage) -> Completion {
        Completion::pending((self.f)(message))
    }
}

/// Forwards messages over an unbounded channel without waiting for the store.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<DispatchMessage>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DispatchMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DispatchSink for ChannelSink {
    fn dispatch(&self, message: DispatchMessage) -> Completion {
        match self.tx.send(message) {
            Ok(()) => Completion::done(),
            Err(_) => Completion::failed(DispatchError::SinkClosed),
        }
    }
}

/// A message waiting for the store to apply it.
#[derive(Debug)]
pub struct StoreRequest {
    pub message: DispatchMessage,
    ack: oneshot::Sender<Result<(), DispatchError>>,
}

impl StoreRequest {
    /// Report the update as applied.
    pub fn ack(self) {
        let _ = self.ack.send(Ok(()));
    }

    /// Report the update as refused.
    pub fn reject(self, reason: impl Into<String>) {
        let kind = self.message.kind.clone();
        let _ = self.ack.send(Err(DispatchError::Rejected {
            kind,
            reason: reason.into(),
        }));
    }
}

/// Forwards messages over a channel and completes when the store acks them.
#[derive(Clone)]
pub struct AckChannelSink {
    tx: mpsc::UnboundedSender<StoreRequest>,
}

impl AckChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StoreRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DispatchSink for AckChannelSink {
    fn dispatch(&self, message: DispatchMessage) -> Completion {
        let kind = message.kind.clone();
        let (ack, ack_rx) = oneshot::channel();

        if self.tx.send(StoreRequest { message, ack }).is_err() {
            return Completion::failed(DispatchError::SinkClosed);
        }

        Completion::pending(async move {
            match ack_rx.await {
                Ok(result) => result,
                Err(_) => Err(DispatchError::AckDropped { kind }),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::Map;
    use std::sync::Arc;

    #[test]
    fn closure_sink_records_and_completes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let sink = move |msg: DispatchMessage| seen_clone.lock().push(msg.kind);

        let completion = sink.dispatch(DispatchMessage::tick("PING"));
        assert!(matches!(completion, Completion::Ready(Ok(()))));
        assert_eq!(*seen.lock(), vec!["PING".to_string()]);
    }

    #[test]
    fn channel_sink_reports_closed_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        let completion = sink.dispatch(DispatchMessage::tick("PING"));
        assert!(matches!(completion, Completion::Ready(Err(DispatchError::SinkClosed))));
    }

    #[tokio::test]
    async fn ack_sink_completes_after_store_acks() {
        let (sink, mut rx) = AckChannelSink::new();
        let completion = sink.dispatch(DispatchMessage::action("SET_VALUE", Map::new(), None));
        assert!(!completion.is_ready());

        let request = rx.recv().await.expect("request");
        assert_eq!(request.message.kind, "SET_VALUE");
        request.ack();

        assert_eq!(completion.await, Ok(()));
    }

    #[tokio::test]
    async fn ack_sink_surfaces_rejection_and_drop() {
        let (sink, mut rx) = AckChannelSink::new();

        let rejected = sink.dispatch(DispatchMessage::tick("A"));
        rx.recv().await.expect("request").reject("nope");
        assert_eq!(
            rejected.await,
            Err(DispatchError::Rejected {
                kind: "A".into(),
                reason: "nope".into()
            })
        );

        let dropped = sink.dispatch(DispatchMessage::tick("B"));
        drop(rx.recv().await.expect("request"));
        assert_eq!(dropped.await, Err(DispatchError::AckDropped { kind: "B".into() }));
    }

    #[tokio::test]
    async fn async_sink_wraps_future() {
        let sink = AsyncSink::new(|msg: DispatchMessage| async move {
            if msg.kind == "BAD" {
                Err(DispatchError::SinkClosed)
            } else {
                Ok(())
            }
        });
        assert_eq!(sink.dispatch(DispatchMessage::tick("OK")).await, Ok(()));
        assert_eq!(
            sink.dispatch(DispatchMessage::tick("BAD")).await,
            Err(DispatchError::SinkClosed)
        );
    }
}
