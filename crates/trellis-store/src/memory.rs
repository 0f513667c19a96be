//! In-memory definition store.
//!
//! All mutation happens behind a single `RwLock`, so readers always observe
//! fully written definitions. Insertion order is tracked separately to keep
//! `get_all` deterministic.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::info;
use trellis_workflow::WorkflowDefinition;
use uuid::Uuid;

use crate::{DefinitionStore, StoreError};

/// In-memory, process-local store for workflow definitions.
#[derive(Default)]
pub struct MemoryDefinitionStore {
  inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
  definitions: HashMap<String, Arc<WorkflowDefinition>>,
  /// Ids in insertion order.
  order: Vec<String>,
}

impl MemoryDefinitionStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl DefinitionStore for MemoryDefinitionStore {
  async fn create(
    &self,
    mut definition: WorkflowDefinition,
  ) -> Result<Arc<WorkflowDefinition>, StoreError> {
    // Structural validation first; a broken definition is rejected even
    // when its id would also conflict.
    definition.validate()?;

    let mut inner = self.inner.write().unwrap();

    if definition.id.is_empty() {
      definition.id = fresh_id(&inner.definitions);
    } else if inner.definitions.contains_key(&definition.id) {
      return Err(StoreError::Conflict(definition.id));
    }

    let stored = Arc::new(definition);
    inner.order.push(stored.id.clone());
    inner.definitions.insert(stored.id.clone(), stored.clone());

    info!(
      definition_id = %stored.id,
      name = %stored.name,
      states = stored.states.len(),
      actions = stored.actions.len(),
      "definition_created"
    );

    Ok(stored)
  }

  async fn get(&self, definition_id: &str) -> Result<Arc<WorkflowDefinition>, StoreError> {
    let inner = self.inner.read().unwrap();
    inner
      .definitions
      .get(definition_id)
      .cloned()
      .ok_or_else(|| StoreError::NotFound(definition_id.to_string()))
  }

  async fn get_all(&self) -> Vec<Arc<WorkflowDefinition>> {
    let inner = self.inner.read().unwrap();
    inner
      .order
      .iter()
      .filter_map(|id| inner.definitions.get(id).cloned())
      .collect()
  }
}

/// Generate an id that is not already in use.
fn fresh_id(definitions: &HashMap<String, Arc<WorkflowDefinition>>) -> String {
  loop {
    let id = Uuid::new_v4().to_string();
    if !definitions.contains_key(&id) {
      return id;
    }
  }
}
