//! Engine error types.

use thiserror::Error;
use trellis_store::ErrorKind;

/// Errors from starting instances and executing actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
  /// The referenced workflow definition was not found.
  #[error("workflow definition '{0}' not found")]
  DefinitionNotFound(String),

  /// The referenced workflow instance was not found.
  #[error("workflow instance '{0}' not found")]
  InstanceNotFound(String),

  /// The named action does not exist in the instance's definition.
  #[error("action '{action_id}' not found in definition '{definition_id}'")]
  ActionNotFound {
    action_id: String,
    definition_id: String,
  },

  /// The definition has no state flagged initial.
  ///
  /// Validation guarantees one exists; the engine checks independently.
  #[error("workflow definition '{0}' does not have an initial state")]
  NoInitialState(String),

  /// The instance sits in a final state; nothing may fire from it.
  #[error("cannot execute actions from final state '{state_id}'")]
  FinalState { state_id: String },

  /// The action exists but is disabled.
  #[error("action '{action_id}' is disabled")]
  ActionDisabled { action_id: String },

  /// The action does not list the instance's current state as a source.
  #[error("action '{action_id}' cannot be executed from state '{state_id}'")]
  ActionNotApplicable {
    action_id: String,
    state_id: String,
  },

  /// The action's target state does not exist in the definition.
  #[error("target state '{state_id}' not found in definition '{definition_id}'")]
  TargetStateMissing {
    state_id: String,
    definition_id: String,
  },

  /// The action's target state is disabled; the transition is blocked even
  /// though the action itself is enabled.
  #[error("target state '{state_id}' is disabled")]
  TargetStateDisabled { state_id: String },

  /// The instance's current state is missing from its definition.
  ///
  /// Unreachable through the public operations; signals corrupted state
  /// rather than a bad request.
  #[error("current state '{state_id}' not found in definition '{definition_id}'")]
  CurrentStateMissing {
    state_id: String,
    definition_id: String,
  },
}

impl EngineError {
  /// Classify this error for transport mapping.
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::DefinitionNotFound(_)
      | Self::InstanceNotFound(_)
      | Self::ActionNotFound { .. } => ErrorKind::NotFound,
      Self::FinalState { .. }
      | Self::ActionDisabled { .. }
      | Self::ActionNotApplicable { .. }
      | Self::TargetStateMissing { .. }
      | Self::TargetStateDisabled { .. } => ErrorKind::IllegalOperation,
      Self::NoInitialState(_) | Self::CurrentStateMissing { .. } => {
        ErrorKind::InternalInconsistency
      }
    }
  }
}
