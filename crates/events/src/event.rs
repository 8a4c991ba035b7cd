use chrono::{DateTime, Utc};

/// An immutable fact published on a bus.
///
/// Subscribers route on [`Event::TYPE`], a stable dotted name such as
/// `user.created`; bump [`Event::VERSION`] when the payload shape changes.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    const TYPE: &'static str;

    const VERSION: u32 = 1;

    /// Business time of the fact, not publish time.
    fn occurred_at(&self) -> DateTime<Utc>;
}
