//! Engine tests, run against the in-memory backend.

use std::sync::Arc;

use serde_json::{Value, json};
use venture_core::fact::VentureId;
use venture_store_memory::MemoryStore;

use crate::{Error, NewVenture, QueryService, WriteCoordinator};

fn setup() -> (
  Arc<MemoryStore>,
  WriteCoordinator<MemoryStore>,
  QueryService<MemoryStore>,
) {
  let store = Arc::new(MemoryStore::new());
  let coordinator = WriteCoordinator::new(Arc::clone(&store));
  let queries = QueryService::new(Arc::clone(&store));
  (store, coordinator, queries)
}

fn new_venture(description: &str, state: &str) -> NewVenture {
  NewVenture {
    description: description.into(),
    state: state.into(),
    ..NewVenture::default()
  }
}

fn changes(value: Value) -> serde_json::Map<String, Value> {
  value.as_object().expect("changes must be an object").clone()
}

fn validation_messages(err: Error) -> Vec<String> {
  match err {
    Error::Validation(messages) => messages,
    other => panic!("expected validation error, got {other:?}"),
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_the_committed_entity() {
  let (_, coordinator, queries) = setup();

  let venture =
    coordinator.create(new_venture("A", "new")).await.unwrap();

  assert_eq!(venture.id, VentureId(1));
  assert_eq!(venture.description, "A");
  assert_eq!(venture.state, "new");
  assert!(!venture.dead);
  assert!(venture.last_modified > 0);

  // Reading back immediately sees exactly what create returned.
  let read = queries.get_one(venture.id).await.unwrap();
  assert_eq!(read, venture);
}

#[tokio::test]
async fn create_normalizes_free_text_and_orders() {
  let (_, coordinator, _) = setup();

  let mut input = new_venture("  spaced out  ", " new ");
  input.orders = " 1, 2,3 ".into();
  input.extra = "  note  ".into();

  let venture = coordinator.create(input).await.unwrap();
  assert_eq!(venture.description, "spaced out");
  assert_eq!(venture.state, "new");
  assert_eq!(venture.orders, "1,2,3");
  assert_eq!(venture.extra, "note");
}

#[tokio::test]
async fn create_accumulates_every_validation_problem() {
  let (store, coordinator, _) = setup();

  let mut input = new_venture("", "");
  input.orders = "bad".into();

  let messages =
    validation_messages(coordinator.create(input).await.unwrap_err());
  assert_eq!(messages.len(), 3);
  assert!(messages.iter().any(|m| m.contains("description")));
  assert!(messages.iter().any(|m| m.contains("state")));
  assert!(messages.iter().any(|m| m.contains("orders")));

  // Nothing was allocated or committed.
  assert_eq!(store.ledger_len(), 0);
}

#[tokio::test]
async fn create_rejects_whitespace_only_fields() {
  let (_, coordinator, _) = setup();

  let err =
    coordinator.create(new_venture("   ", "new")).await.unwrap_err();
  let messages = validation_messages(err);
  assert_eq!(messages, vec!["description must not be empty".to_string()]);
}

// ─── Modify ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn modify_updates_only_the_named_fields() {
  let (_, coordinator, queries) = setup();
  let created =
    coordinator.create(new_venture("A", "new")).await.unwrap();

  let updated = coordinator
    .modify(&[created.id], &changes(json!({ "state": "done" })))
    .await
    .unwrap();

  assert_eq!(updated.len(), 1);
  assert_eq!(updated[0].id, created.id);
  assert_eq!(updated[0].description, "A");
  assert_eq!(updated[0].state, "done");
  assert!(updated[0].last_modified > created.last_modified);

  let read = queries.get_one(created.id).await.unwrap();
  assert_eq!(read, updated[0]);
}

#[tokio::test]
async fn modify_skips_ids_with_no_current_row() {
  let (_, coordinator, _) = setup();
  coordinator.create(new_venture("A", "new")).await.unwrap();

  let updated = coordinator
    .modify(
      &[VentureId(1), VentureId(999)],
      &changes(json!({ "description": "X" })),
    )
    .await
    .unwrap();

  assert_eq!(updated.len(), 1);
  assert_eq!(updated[0].id, VentureId(1));
  assert_eq!(updated[0].description, "X");
}

#[tokio::test]
async fn modify_rejects_unknown_fields_before_touching_anything() {
  let (store, coordinator, _) = setup();
  coordinator.create(new_venture("A", "new")).await.unwrap();

  let err = coordinator
    .modify(
      &[VentureId(1)],
      &changes(json!({ "state": "done", "bogus": 1 })),
    )
    .await
    .unwrap_err();

  let messages = validation_messages(err);
  assert_eq!(messages, vec!["unknown field: bogus".to_string()]);
  // The valid half of the request was not applied.
  assert_eq!(store.ledger_len(), 1);
}

#[tokio::test]
async fn modify_accumulates_type_problems_across_fields() {
  let (_, coordinator, _) = setup();
  coordinator.create(new_venture("A", "new")).await.unwrap();

  let err = coordinator
    .modify(
      &[VentureId(1)],
      &changes(json!({ "dead": "yes", "description": 7 })),
    )
    .await
    .unwrap_err();

  let messages = validation_messages(err);
  assert_eq!(messages.len(), 2);
  assert!(messages.iter().any(|m| m.contains("dead")));
  assert!(messages.iter().any(|m| m.contains("description")));
}

#[tokio::test]
async fn modify_keeps_description_non_empty() {
  let (_, coordinator, _) = setup();
  coordinator.create(new_venture("A", "new")).await.unwrap();

  let err = coordinator
    .modify(&[VentureId(1)], &changes(json!({ "description": "  " })))
    .await
    .unwrap_err();

  let messages = validation_messages(err);
  assert_eq!(messages, vec!["description must not be empty".to_string()]);
}

#[tokio::test]
async fn modify_validates_orders_like_create() {
  let (_, coordinator, queries) = setup();
  coordinator.create(new_venture("A", "new")).await.unwrap();

  let err = coordinator
    .modify(&[VentureId(1)], &changes(json!({ "orders": "1,nope" })))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Validation(_)));

  let updated = coordinator
    .modify(&[VentureId(1)], &changes(json!({ "orders": " 4, 5 " })))
    .await
    .unwrap();
  assert_eq!(updated[0].orders, "4,5");
  assert_eq!(queries.get_one(VentureId(1)).await.unwrap().orders, "4,5");
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_one_missing_is_not_found() {
  let (_, _, queries) = setup();

  let err = queries.get_one(VentureId(5)).await.unwrap_err();
  assert!(matches!(err, Error::NotFound(VentureId(5))));
}

#[tokio::test]
async fn get_many_omits_missing_ids() {
  let (_, coordinator, queries) = setup();
  coordinator.create(new_venture("A", "new")).await.unwrap();
  coordinator.create(new_venture("B", "new")).await.unwrap();

  let found = queries
    .get_many(&[VentureId(2), VentureId(7), VentureId(1)])
    .await
    .unwrap();

  let ids: Vec<_> = found.iter().map(|v| v.id).collect();
  assert_eq!(ids, vec![VentureId(2), VentureId(1)]);
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_modify_retire_lifecycle() {
  let (store, coordinator, queries) = setup();

  let created =
    coordinator.create(new_venture("A", "new")).await.unwrap();
  assert_eq!(created.id, VentureId(1));
  assert!(!created.dead);

  let modified = coordinator
    .modify(&[created.id], &changes(json!({ "state": "done" })))
    .await
    .unwrap();
  assert_eq!(modified[0].state, "done");
  assert_eq!(modified[0].description, "A");
  assert!(modified[0].last_modified > created.last_modified);

  let retired = coordinator
    .modify(&[created.id], &changes(json!({ "dead": true })))
    .await
    .unwrap();
  assert!(retired[0].dead);

  // Retired ventures vanish from every read path.
  assert!(matches!(
    queries.get_one(created.id).await.unwrap_err(),
    Error::NotFound(_)
  ));
  assert!(queries.get_all().await.unwrap().is_empty());
  assert!(queries.get_many(&[created.id]).await.unwrap().is_empty());

  // Retired ventures cannot be modified further.
  let after = coordinator
    .modify(&[created.id], &changes(json!({ "state": "undone" })))
    .await
    .unwrap();
  assert!(after.is_empty());

  // But the full history is still on the ledger.
  assert_eq!(store.ledger_len(), 3);
}

#[tokio::test]
async fn concurrent_creates_yield_distinct_ids() {
  let (_, coordinator, queries) = setup();
  let coordinator = Arc::new(coordinator);

  let mut handles = Vec::new();
  for i in 0..12 {
    let coordinator = Arc::clone(&coordinator);
    handles.push(tokio::spawn(async move {
      coordinator
        .create(new_venture(&format!("V{i}"), "new"))
        .await
        .unwrap()
        .id
    }));
  }

  let mut ids = Vec::new();
  for handle in handles {
    ids.push(handle.await.unwrap());
  }
  ids.sort();

  let expected: Vec<_> = (1..=12).map(VentureId).collect();
  assert_eq!(ids, expected);
  assert_eq!(queries.get_all().await.unwrap().len(), 12);
}
