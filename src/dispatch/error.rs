use thiserror::Error;

/// Failures reported by a dispatch sink.
///
/// The engine never recovers from these itself; they travel back to whoever
/// awaits the [`Completion`](super::Completion).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The store side of the sink has gone away.
    #[error("Dispatch sink is closed")]
    SinkClosed,

    /// The store refused the message.
    #[error("Store rejected '{kind}': {reason}")]
    Rejected { kind: String, reason: String },

    /// The store dropped the acknowledgement without answering.
    #[error("Store dropped acknowledgement for '{kind}'")]
    AckDropped { kind: String },
}
