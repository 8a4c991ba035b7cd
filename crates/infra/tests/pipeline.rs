//! End-to-end: workflows over module stores, admin handlers, the daily job and
//! the `user.created` subscriber.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value as JsonValue;

use pricebook_brands::{Brand, CreateBrand};
use pricebook_core::BrandId;
use pricebook_events::{
    EventBus, EventEnvelope, InMemoryEventBus, Step, StepResponse, WorkflowError, WorkflowRun,
    publish_event,
};
use pricebook_infra::handlers::{self, HandlerError};
use pricebook_infra::jobs::{JobConfig, run_daily_job};
use pricebook_infra::store::{InMemoryModuleStore, ModuleStore, StoreError};
use pricebook_infra::subscribers::{UserCreated, spawn_subscriber};
use pricebook_infra::workflows::CreateBrandStep;
use pricebook_infra::{AppContext, Config};

/// A step that always fails, to force rollback of earlier steps.
struct Reject;

impl Step for Reject {
    const NAME: &'static str = "reject";

    type Input = ();
    type Output = ();
    type CompensateInput = ();
    type Error = String;

    fn invoke(&self, _: ()) -> Result<StepResponse<(), ()>, String> {
        Err("rejected".to_string())
    }

    fn compensate(&self, _: ()) -> Result<(), String> {
        Ok(())
    }
}

/// Brand store whose deletes always fail.
#[derive(Default)]
struct UndeletableStore(InMemoryModuleStore<BrandId, Brand>);

impl ModuleStore<BrandId, Brand> for UndeletableStore {
    fn insert(&self, key: BrandId, value: Brand) -> Result<(), StoreError> {
        self.0.insert(key, value)
    }

    fn get(&self, key: &BrandId) -> Result<Option<Brand>, StoreError> {
        self.0.get(key)
    }

    fn update(&self, key: &BrandId, value: Brand) -> Result<(), StoreError> {
        self.0.update(key, value)
    }

    fn delete(&self, _: &BrandId) -> Result<Brand, StoreError> {
        Err(StoreError::Poisoned)
    }

    fn list(&self) -> Result<Vec<Brand>, StoreError> {
        self.0.list()
    }
}

#[test]
fn failing_later_step_deletes_the_created_brand() {
    let store = Arc::new(InMemoryModuleStore::<BrandId, Brand>::new());
    let create = CreateBrandStep::new(store.clone());

    let mut run = WorkflowRun::new("create-brand-then-reject");
    let brand = run.step(&create, CreateBrand::new("Acme")).unwrap();
    assert_eq!(store.get(brand.id_typed()).unwrap(), Some(brand));

    let err = run.step(&Reject, ()).unwrap_err();
    match &err {
        WorkflowError::StepFailed { step, reason, .. } => {
            assert_eq!(step, "reject");
            assert_eq!(reason, "rejected");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.compensation_failures().is_empty());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn failed_compensation_is_reported() {
    let store = Arc::new(UndeletableStore::default());
    let create = CreateBrandStep::new(store.clone());

    let mut run = WorkflowRun::new("create-brand-then-reject");
    run.step(&create, CreateBrand::new("Acme")).unwrap();
    let err = run.step(&Reject, ()).unwrap_err();

    let failures = err.compensation_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].step, "create-brand-step");
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn admin_handlers_share_the_context_stores() {
    let ctx = AppContext::in_memory(Config::default());

    let a = handlers::create_brand(&ctx, r#"{"name":"Acme"}"#).unwrap();
    let b = handlers::create_brand(&ctx, r#"{"name":"Globex"}"#).unwrap();
    let listed = handlers::list_brands(&ctx).unwrap();
    assert_eq!(listed.brands, vec![a.brand, b.brand]);

    let err: HandlerError = handlers::create_brand(&ctx, r#"{"title":"x"}"#).unwrap_err();
    assert_eq!(err.status_code(), 400);

    let created = handlers::create_price_set(&ctx).unwrap();
    assert_eq!(
        ctx.price_sets().get(&created.price_set.id).unwrap(),
        Some(created.price_set)
    );
}

#[test]
fn listing_returns_products_linked_through_the_admin_handler() {
    let ctx = AppContext::in_memory(Config::default());
    let brand = handlers::create_brand(&ctx, r#"{"name":"Acme"}"#).unwrap().brand;
    let other = handlers::create_brand(&ctx, r#"{"name":"Globex"}"#).unwrap().brand;

    handlers::link_product(
        &ctx,
        brand.id_typed().as_str(),
        r#"{"product_id":"prod_01","title":"Linen shirt"}"#,
    )
    .unwrap();

    let listed: JsonValue = serde_json::to_value(handlers::list_brands(&ctx).unwrap()).unwrap();
    assert_eq!(listed["brands"][0]["products"][0]["id"], "prod_01");
    assert_eq!(listed["brands"][0]["products"][0]["title"], "Linen shirt");
    assert_eq!(listed["brands"][1]["products"], serde_json::json!([]));
    assert_eq!(listed["brands"][1]["id"], other.id_typed().as_str());
}

#[test]
fn daily_job_uses_configured_schedule() {
    let config = Config::from_lookup(|key| {
        (key == "PRICEBOOK_DAILY_JOB_SCHEDULE").then(|| "15 3 * * *".to_string())
    })
    .unwrap();
    let ctx = AppContext::in_memory(config);

    let job = JobConfig::for_context(&ctx);
    assert_eq!(job.name, "run-once-a-day");
    assert_eq!(job.schedule, "15 3 * * *");

    run_daily_job(&ctx).unwrap();
    assert_eq!(ctx.price_sets().list().unwrap().len(), 1);
}

#[test]
fn user_created_event_creates_a_price_set() {
    let ctx = AppContext::in_memory(Config::default());
    let bus = Arc::new(InMemoryEventBus::<EventEnvelope<JsonValue>>::new());
    let handle = spawn_subscriber(ctx.clone(), bus.clone()).unwrap();

    let ignored = EventEnvelope::new(
        uuid::Uuid::now_v7(),
        "order.placed",
        1,
        chrono::Utc::now(),
        serde_json::json!({ "id": "order_1" }),
    );
    bus.publish(ignored).unwrap();
    for id in ["user_1", "user_2"] {
        publish_event(&bus, UserCreated::new(id)).unwrap();
    }

    let deadline = Instant::now() + Duration::from_secs(5);
    while handle.handled() < 2 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    handle.shutdown();

    assert_eq!(ctx.price_sets().list().unwrap().len(), 2);
}
