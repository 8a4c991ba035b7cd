//! Event subscribers.
//!
//! A subscriber pairs an event type with a handler; [`spawn_subscriber`] runs
//! the handlers on a background thread fed by an [`pricebook_events::EventBus`].

pub mod user_created;
pub mod worker;

pub use user_created::{
    SubscriberConfig, SubscriberError, USER_CREATED, UserCreated, handle_user_created,
};
pub use worker::{SubscriberHandle, spawn_subscriber};
