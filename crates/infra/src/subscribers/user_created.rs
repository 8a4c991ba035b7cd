use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::info;

use pricebook_events::{Event, EventEnvelope, WorkflowError};
use pricebook_pricing::CreatePriceSet;

use crate::context::AppContext;
use crate::workflows::{CreatePriceSetResult, CreatePriceSetStep, create_price_set_workflow};

pub const USER_CREATED: &str = "user.created";

/// What the host event bus registers the subscriber under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubscriberConfig {
    pub event: &'static str,
}

impl SubscriberConfig {
    pub const USER_CREATED: SubscriberConfig = SubscriberConfig {
        event: USER_CREATED,
    };
}

/// A user account was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreated {
    pub id: String,
    #[serde(default = "Utc::now")]
    pub occurred_at: DateTime<Utc>,
}

impl UserCreated {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            occurred_at: Utc::now(),
        }
    }
}

impl Event for UserCreated {
    const TYPE: &'static str = USER_CREATED;

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[derive(Debug, Error)]
pub enum SubscriberError {
    #[error("unexpected event type `{0}`")]
    UnexpectedEvent(String),

    #[error("malformed event payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

/// Runs create-price-set for a new user.
pub fn handle_user_created(
    ctx: &AppContext,
    envelope: &EventEnvelope<JsonValue>,
) -> Result<CreatePriceSetResult, SubscriberError> {
    if envelope.event_type() != USER_CREATED {
        return Err(SubscriberError::UnexpectedEvent(envelope.event_type().to_string()));
    }
    let event: UserCreated = envelope.decode()?;
    info!(event = USER_CREATED, user_id = %event.id, "handling event");

    let step = CreatePriceSetStep::new(ctx.price_sets().clone());
    let result = create_price_set_workflow(&step, CreatePriceSet::daily_default())?;
    info!(
        event = USER_CREATED,
        user_id = %event.id,
        price_set_id = %result.price_set.id,
        "price set created for user"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::ModuleStore;
    use serde_json::json;

    fn envelope(event_type: &str, payload: JsonValue) -> EventEnvelope<JsonValue> {
        EventEnvelope::new(uuid::Uuid::now_v7(), event_type, 1, Utc::now(), payload)
    }

    #[test]
    fn config_names_the_event() {
        assert_eq!(SubscriberConfig::USER_CREATED.event, "user.created");
    }

    #[test]
    fn wrapped_event_is_handled() {
        let ctx = AppContext::in_memory(Config::default());
        let envelope = EventEnvelope::wrap(UserCreated::new("user_1"))
            .into_json()
            .unwrap();
        assert_eq!(envelope.event_type(), USER_CREATED);

        let result = handle_user_created(&ctx, &envelope).unwrap();
        assert_eq!(ctx.price_sets().list().unwrap(), vec![result.price_set]);
    }

    #[test]
    fn host_payload_without_timestamp_decodes() {
        let ctx = AppContext::in_memory(Config::default());
        let envelope = envelope(USER_CREATED, json!({ "id": "user_2" }));
        assert!(handle_user_created(&ctx, &envelope).is_ok());
    }

    #[test]
    fn wrong_type_and_bad_payload_are_rejected() {
        let ctx = AppContext::in_memory(Config::default());

        let other = envelope("order.placed", json!({ "id": "o1" }));
        assert!(matches!(
            handle_user_created(&ctx, &other),
            Err(SubscriberError::UnexpectedEvent(t)) if t == "order.placed"
        ));

        let bad = envelope(USER_CREATED, json!({ "name": "no id" }));
        assert!(matches!(
            handle_user_created(&ctx, &bad),
            Err(SubscriberError::Payload(_))
        ));
        assert!(ctx.price_sets().list().unwrap().is_empty());
    }
}
