use std::fmt;
use std::future::{Future, IntoFuture};

use futures_core::future::BoxFuture;

use super::error::DispatchError;

/// Result of handing a message to a dispatch sink.
///
/// Fire-and-forget sinks return `Ready`. Sinks whose store update lands later
/// return `Pending`; awaiting it sequences follow-up work after the update.
pub enum Completion {
    Ready(Result<(), DispatchError>),
    Pending(BoxFuture<'static, Result<(), DispatchError>>),
}

impl Completion {
    pub fn done() -> Self {
        Completion::Ready(Ok(()))
    }

    pub fn failed(error: DispatchError) -> Self {
        Completion::Ready(Err(error))
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<(), DispatchError>> + Send + 'static,
    {
        Completion::Pending(Box::pin(future))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Completion::Ready(_))
    }

    /// Combine several completions into one.
    ///
    /// Pending parts are awaited in order. The combined result is the first
    /// error seen, ready errors before pending ones; every pending part is
    /// still driven to the end.
    pub fn all<I>(completions: I) -> Self
    where
        I: IntoIterator<Item = Completion>,
    {
        let mut first_error = None;
        let mut pending = Vec::new();

        for completion in completions {
            match completion {
                Completion::Ready(Ok(())) => {}
                Completion::Ready(Err(err)) => {
                    first_error.get_or_insert(err);
                }
                Completion::Pending(future) => pending.push(future),
            }
        }

        if pending.is_empty() {
            return Completion::Ready(first_error.map_or(Ok(()), Err));
        }

        Completion::pending(async move {
            let mut result = first_error.map_or(Ok(()), Err);
            for future in pending {
                let outcome = future.await;
                if result.is_ok() {
                    result = outcome;
                }
            }
            result
        })
    }
}

impl IntoFuture for Completion {
    type Output = Result<(), DispatchError>;
    type IntoFuture = BoxFuture<'static, Result<(), DispatchError>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Completion::Ready(result) => Box::pin(std::future::ready(result)),
            Completion::Pending(future) => future,
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Completion::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
