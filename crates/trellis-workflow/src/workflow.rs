use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::ValidationError;
use crate::state::State;

/// A complete workflow definition: the state machine instances run on.
///
/// An empty `id` means "assign one at creation" — the store generates a
/// fresh unique id when the definition is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
  #[serde(default)]
  pub id: String,
  pub name: String,
  pub states: Vec<State>,
  pub actions: Vec<Action>,
}

impl WorkflowDefinition {
  /// Check every structural invariant, failing on the first violation.
  ///
  /// Checks are all-or-nothing: a definition either satisfies every
  /// invariant or is rejected outright, with no partial result.
  pub fn validate(&self) -> Result<(), ValidationError> {
    let mut state_ids: HashSet<&str> = HashSet::with_capacity(self.states.len());
    for state in &self.states {
      if !state_ids.insert(state.id.as_str()) {
        return Err(ValidationError::DuplicateStateId(state.id.clone()));
      }
    }

    let mut action_ids: HashSet<&str> = HashSet::with_capacity(self.actions.len());
    for action in &self.actions {
      if !action_ids.insert(action.id.as_str()) {
        return Err(ValidationError::DuplicateActionId(action.id.clone()));
      }
    }

    let initial_count = self.states.iter().filter(|s| s.is_initial).count();
    if initial_count != 1 {
      return Err(ValidationError::InitialStateCount {
        count: initial_count,
      });
    }

    // Every state an action references must exist in the definition.
    for action in &self.actions {
      if !state_ids.contains(action.to_state.as_str()) {
        return Err(ValidationError::UnknownState {
          action_id: action.id.clone(),
          state_id: action.to_state.clone(),
        });
      }
      for from_state in &action.from_states {
        if !state_ids.contains(from_state.as_str()) {
          return Err(ValidationError::UnknownState {
            action_id: action.id.clone(),
            state_id: from_state.clone(),
          });
        }
      }
    }

    Ok(())
  }

  /// Dry-run form of [`validate`](Self::validate): true when well-formed.
  pub fn is_valid(&self) -> bool {
    self.validate().is_ok()
  }

  /// Get a state by id.
  pub fn get_state(&self, state_id: &str) -> Option<&State> {
    self.states.iter().find(|s| s.id == state_id)
  }

  /// Get an action by id.
  pub fn get_action(&self, action_id: &str) -> Option<&Action> {
    self.actions.iter().find(|a| a.id == action_id)
  }

  /// The state flagged initial, if any.
  pub fn initial_state(&self) -> Option<&State> {
    self.states.iter().find(|s| s.is_initial)
  }
}
