use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use pricebook_events::{EventBus, EventEnvelope, Subscription};

use super::user_created::{USER_CREATED, handle_user_created};
use crate::context::AppContext;

const THREAD_NAME: &str = "pricebook-subscriber";

/// Handle to a running subscriber thread.
#[derive(Debug)]
pub struct SubscriberHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
    handled: Arc<AtomicU64>,
}

impl SubscriberHandle {
    /// Number of events handled successfully so far.
    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Acquire)
    }

    /// Request shutdown and wait for the thread to stop.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

/// Subscribe to `bus` and dispatch known event types on a background thread.
///
/// Events nobody subscribed to are skipped. A failing handler is logged and the
/// loop carries on; nothing is retried.
pub fn spawn_subscriber<B>(ctx: AppContext, bus: B) -> io::Result<SubscriberHandle>
where
    B: EventBus<EventEnvelope<JsonValue>>,
{
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
    let subscription = bus.subscribe();
    let handled = Arc::new(AtomicU64::new(0));
    let counter = handled.clone();

    let join = thread::Builder::new()
        .name(THREAD_NAME.to_string())
        .spawn(move || subscriber_loop(&ctx, subscription, shutdown_rx, &counter))?;

    info!(thread = THREAD_NAME, event = USER_CREATED, "subscriber started");
    Ok(SubscriberHandle {
        shutdown: shutdown_tx,
        join: Some(join),
        handled,
    })
}

fn subscriber_loop(
    ctx: &AppContext,
    subscription: Subscription<EventEnvelope<JsonValue>>,
    shutdown_rx: mpsc::Receiver<()>,
    handled: &AtomicU64,
) {
    let tick = Duration::from_millis(50);

    loop {
        if shutdown_rx.try_recv().is_ok() {
            break;
        }

        match subscription.recv_timeout(tick) {
            Ok(envelope) => match envelope.event_type() {
                USER_CREATED => match handle_user_created(ctx, &envelope) {
                    Ok(_) => {
                        handled.fetch_add(1, Ordering::AcqRel);
                    }
                    Err(err) => {
                        warn!(event = USER_CREATED, event_id = %envelope.event_id(), error = %err, "subscriber handler failed");
                    }
                },
                other => debug!(event = other, "no subscriber for event"),
            },
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    info!(thread = THREAD_NAME, "subscriber stopped");
}
