//! Domain events, pub/sub, and workflow step mechanics.
//!
//! Nothing in here knows about brands or price lists; domain crates implement
//! [`Event`] and [`Step`] and infra wires them together.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;
pub mod workflow;

pub use bus::{EventBus, PublishError, Subscription, publish_event};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use workflow::{CompensationFailure, Step, StepResponse, WorkflowError, WorkflowRun};
