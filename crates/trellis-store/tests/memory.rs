//! Tests for the in-memory definition store.

use trellis_store::{DefinitionStore, ErrorKind, MemoryDefinitionStore, StoreError};
use trellis_workflow::{Action, State, WorkflowDefinition};

fn state(id: &str, is_initial: bool) -> State {
  State {
    id: id.to_string(),
    name: id.to_string(),
    enabled: true,
    is_initial,
    is_final: false,
  }
}

fn valid_definition(id: &str) -> WorkflowDefinition {
  WorkflowDefinition {
    id: id.to_string(),
    name: "Approval".to_string(),
    states: vec![state("pending", true), state("approved", false)],
    actions: vec![Action {
      id: "approve".to_string(),
      name: "Approve".to_string(),
      enabled: true,
      from_states: vec!["pending".to_string()],
      to_state: "approved".to_string(),
    }],
  }
}

fn invalid_definition(id: &str) -> WorkflowDefinition {
  // No initial state.
  WorkflowDefinition {
    states: vec![state("pending", false)],
    ..valid_definition(id)
  }
}

#[tokio::test]
async fn create_and_get_round_trip() {
  let store = MemoryDefinitionStore::new();

  let created = store.create(valid_definition("approval")).await.unwrap();
  assert_eq!(created.id, "approval");

  let fetched = store.get("approval").await.unwrap();
  assert_eq!(fetched.name, "Approval");
  assert_eq!(fetched.states.len(), 2);
}

#[tokio::test]
async fn create_rejects_invalid_definition_without_storing() {
  let store = MemoryDefinitionStore::new();

  let result = store.create(invalid_definition("broken")).await;
  assert!(matches!(result, Err(StoreError::Invalid(_))));
  assert_eq!(result.unwrap_err().kind(), ErrorKind::ValidationFailed);

  // Nothing was stored.
  assert!(store.get("broken").await.is_err());
  assert!(store.get_all().await.is_empty());
}

#[tokio::test]
async fn create_assigns_fresh_id_when_empty() {
  let store = MemoryDefinitionStore::new();

  let first = store.create(valid_definition("")).await.unwrap();
  let second = store.create(valid_definition("")).await.unwrap();

  assert!(!first.id.is_empty());
  assert!(!second.id.is_empty());
  assert_ne!(first.id, second.id);

  // Assigned ids resolve through get.
  assert_eq!(store.get(&first.id).await.unwrap().id, first.id);
}

#[tokio::test]
async fn create_duplicate_id_conflicts_and_keeps_first() {
  let store = MemoryDefinitionStore::new();

  store.create(valid_definition("approval")).await.unwrap();

  let mut second = valid_definition("approval");
  second.name = "Replacement".to_string();
  let result = store.create(second).await;

  assert!(matches!(result, Err(StoreError::Conflict(ref id)) if id == "approval"));
  assert_eq!(result.unwrap_err().kind(), ErrorKind::Conflict);

  // The first write is retained untouched.
  assert_eq!(store.get("approval").await.unwrap().name, "Approval");
  assert_eq!(store.get_all().await.len(), 1);
}

#[tokio::test]
async fn validation_failure_takes_precedence_over_conflict() {
  let store = MemoryDefinitionStore::new();
  store.create(valid_definition("approval")).await.unwrap();

  // Same id as an existing definition, but structurally broken: the
  // validation error wins.
  let result = store.create(invalid_definition("approval")).await;
  assert!(matches!(result, Err(StoreError::Invalid(_))));
}

#[tokio::test]
async fn get_missing_definition_is_not_found() {
  let store = MemoryDefinitionStore::new();

  let result = store.get("nonexistent").await;
  assert!(matches!(result, Err(StoreError::NotFound(ref id)) if id == "nonexistent"));
  assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn get_all_preserves_insertion_order() {
  let store = MemoryDefinitionStore::new();

  for id in ["c", "a", "b"] {
    store.create(valid_definition(id)).await.unwrap();
  }

  let ids: Vec<String> = store
    .get_all()
    .await
    .iter()
    .map(|d| d.id.clone())
    .collect();
  assert_eq!(ids, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn validate_is_a_dry_run() {
  let store = MemoryDefinitionStore::new();

  assert!(store.validate(&valid_definition("approval")));
  assert!(!store.validate(&invalid_definition("broken")));

  // Neither call stored anything.
  assert!(store.get_all().await.is_empty());
}
