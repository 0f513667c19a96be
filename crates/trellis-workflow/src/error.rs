use thiserror::Error;

/// Why a workflow definition failed structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  /// Two states share the same id.
  #[error("duplicate state id '{0}'")]
  DuplicateStateId(String),

  /// Two actions share the same id.
  #[error("duplicate action id '{0}'")]
  DuplicateActionId(String),

  /// A definition must flag exactly one state as initial.
  #[error("expected exactly one initial state, found {count}")]
  InitialStateCount { count: usize },

  /// An action references a state id that does not exist in the definition.
  #[error("action '{action_id}' references unknown state '{state_id}'")]
  UnknownState { action_id: String, state_id: String },
}
