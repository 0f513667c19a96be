//! Workflow instance engine.
//!
//! The [`InstanceEngine`] starts instances against stored definitions and
//! enforces transition legality. Instances live in a lock-guarded in-memory
//! map; operations return owned snapshots taken under the lock, so a caller
//! never observes the state advanced without its matching history entry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::{info, instrument, warn};
use trellis_store::DefinitionStore;
use trellis_workflow::{Action, WorkflowDefinition};
use uuid::Uuid;

use crate::error::EngineError;
use crate::instance::{HistoryEntry, START_ACTION_ID, WorkflowInstance};

/// Runs workflow instances against a definition store.
///
/// Definitions are resolved through the store and never mutated; only
/// per-instance state changes, and each instance is mutated only by
/// operations targeting its own id.
pub struct InstanceEngine {
  definitions: Arc<dyn DefinitionStore>,
  inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
  instances: HashMap<String, WorkflowInstance>,
  /// Ids in insertion order.
  order: Vec<String>,
}

impl InstanceEngine {
  /// Create an engine backed by the given definition store.
  pub fn new(definitions: Arc<dyn DefinitionStore>) -> Self {
    Self {
      definitions,
      inner: RwLock::new(Inner::default()),
    }
  }

  /// Start a new instance of a definition.
  ///
  /// The instance is placed on the definition's initial state and its
  /// history is seeded with a single [`START_ACTION_ID`] entry.
  #[instrument(skip(self))]
  pub async fn start(&self, definition_id: &str) -> Result<WorkflowInstance, EngineError> {
    let definition = self
      .definitions
      .get(definition_id)
      .await
      .map_err(|_| EngineError::DefinitionNotFound(definition_id.to_string()))?;

    // Validation guarantees an initial state exists; defend anyway since
    // the engine does not own the definition.
    let initial = definition
      .initial_state()
      .ok_or_else(|| EngineError::NoInitialState(definition_id.to_string()))?;

    let instance = WorkflowInstance {
      id: Uuid::new_v4().to_string(),
      definition_id: definition_id.to_string(),
      current_state_id: initial.id.clone(),
      history: vec![HistoryEntry {
        action_id: START_ACTION_ID.to_string(),
        from_state_id: None,
        to_state_id: initial.id.clone(),
        timestamp: Utc::now(),
      }],
    };

    let mut inner = self.inner.write().unwrap();
    inner.order.push(instance.id.clone());
    inner.instances.insert(instance.id.clone(), instance.clone());

    info!(
      instance_id = %instance.id,
      definition_id,
      state_id = %instance.current_state_id,
      "instance_started"
    );

    Ok(instance)
  }

  /// Get a snapshot of an instance by id.
  pub async fn get(&self, instance_id: &str) -> Result<WorkflowInstance, EngineError> {
    let inner = self.inner.read().unwrap();
    inner
      .instances
      .get(instance_id)
      .cloned()
      .ok_or_else(|| EngineError::InstanceNotFound(instance_id.to_string()))
  }

  /// List snapshots of all instances in insertion order.
  pub async fn get_all(&self) -> Vec<WorkflowInstance> {
    let inner = self.inner.read().unwrap();
    inner
      .order
      .iter()
      .filter_map(|id| inner.instances.get(id).cloned())
      .collect()
  }

  /// Execute an action against an instance.
  ///
  /// The full precondition chain runs before anything is touched; a failed
  /// call leaves state and history unchanged. On success the state advance
  /// and the history append are applied together under the write lock.
  #[instrument(skip(self))]
  pub async fn execute_action(
    &self,
    instance_id: &str,
    action_id: &str,
  ) -> Result<WorkflowInstance, EngineError> {
    let definition_id = {
      let inner = self.inner.read().unwrap();
      let instance = inner
        .instances
        .get(instance_id)
        .ok_or_else(|| EngineError::InstanceNotFound(instance_id.to_string()))?;
      // An instance's definition_id never changes, so it is safe to
      // resolve the definition outside the lock.
      instance.definition_id.clone()
    };

    let definition = self
      .definitions
      .get(&definition_id)
      .await
      .map_err(|_| EngineError::DefinitionNotFound(definition_id.clone()))?;

    // Re-resolve under the write lock so the legality check and the
    // mutation are atomic with respect to concurrent callers.
    let mut inner = self.inner.write().unwrap();
    let instance = inner
      .instances
      .get_mut(instance_id)
      .ok_or_else(|| EngineError::InstanceNotFound(instance_id.to_string()))?;

    let action = match check_transition(&definition, instance, action_id) {
      Ok(action) => action,
      Err(e) => {
        warn!(instance_id, action_id, error = %e, "action_rejected");
        return Err(e);
      }
    };

    let entry = HistoryEntry {
      action_id: action.id.clone(),
      from_state_id: Some(instance.current_state_id.clone()),
      to_state_id: action.to_state.clone(),
      timestamp: Utc::now(),
    };
    instance.current_state_id = entry.to_state_id.clone();
    instance.history.push(entry);

    info!(
      instance_id,
      action_id,
      state_id = %instance.current_state_id,
      "action_executed"
    );

    Ok(instance.clone())
  }
}

/// Check whether `action_id` may fire for `instance`, returning the action.
///
/// Pure legality check — performs no mutation. Checks short-circuit in
/// order: current state resolves, current state not final, action exists,
/// action enabled, action applicable from the current state, target state
/// resolves, target state enabled.
fn check_transition<'a>(
  definition: &'a WorkflowDefinition,
  instance: &WorkflowInstance,
  action_id: &str,
) -> Result<&'a Action, EngineError> {
  let current = definition
    .get_state(&instance.current_state_id)
    .ok_or_else(|| EngineError::CurrentStateMissing {
      state_id: instance.current_state_id.clone(),
      definition_id: definition.id.clone(),
    })?;

  if current.is_final {
    return Err(EngineError::FinalState {
      state_id: current.id.clone(),
    });
  }

  let action = definition
    .get_action(action_id)
    .ok_or_else(|| EngineError::ActionNotFound {
      action_id: action_id.to_string(),
      definition_id: definition.id.clone(),
    })?;

  if !action.enabled {
    return Err(EngineError::ActionDisabled {
      action_id: action.id.clone(),
    });
  }

  if !action.from_states.contains(&instance.current_state_id) {
    return Err(EngineError::ActionNotApplicable {
      action_id: action.id.clone(),
      state_id: instance.current_state_id.clone(),
    });
  }

  // Guaranteed by definition validation; checked independently.
  let target = definition
    .get_state(&action.to_state)
    .ok_or_else(|| EngineError::TargetStateMissing {
      state_id: action.to_state.clone(),
      definition_id: definition.id.clone(),
    })?;

  // A disabled destination blocks the transition even though the action
  // itself is enabled. Source-state enabled is deliberately not checked.
  if !target.enabled {
    return Err(EngineError::TargetStateDisabled {
      state_id: target.id.clone(),
    });
  }

  Ok(action)
}
