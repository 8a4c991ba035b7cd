//! Pub/sub mechanics.
//!
//! Promises are minimal:
//!
//! - every subscription receives every message published after it was created
//! - delivery is at-least-once, so handlers must tolerate duplicates
//! - nothing is persisted; a subscriber that was not listening misses the message

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::{Event, EventEnvelope};

/// Receiving end of a bus, owned by the thread that handles the messages.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// loop {
///     match subscription.recv_timeout(Duration::from_millis(50)) {
///         Ok(envelope) => dispatch(envelope),
///         Err(RecvTimeoutError::Timeout) => continue, // check for shutdown
///         Err(RecvTimeoutError::Disconnected) => break,
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    pub fn recv(&self) -> Result<M, RecvError> {
        self.receiver.recv()
    }

    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Broadcast bus. `publish` failures go back to the publisher.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}

#[derive(Debug, Error)]
pub enum PublishError<E: core::fmt::Debug> {
    #[error("event payload could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("bus rejected the event: {0:?}")]
    Bus(E),
}

/// Wrap a typed event in a JSON envelope and publish it.
pub fn publish_event<B, E>(bus: &B, event: E) -> Result<(), PublishError<B::Error>>
where
    B: EventBus<EventEnvelope<JsonValue>> + ?Sized,
    E: Event + Serialize,
{
    let envelope = EventEnvelope::wrap(event).into_json()?;
    bus.publish(envelope).map_err(PublishError::Bus)
}
