//! Infrastructure layer: config, module stores, workflows, admin handlers,
//! the daily job and event subscribers.

pub mod config;
pub mod context;
pub mod handlers;
pub mod jobs;
pub mod store;
pub mod subscribers;
pub mod workflows;

pub use config::{Config, ConfigError};
pub use context::AppContext;
