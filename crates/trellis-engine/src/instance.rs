use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel action id recorded in the history entry written when an
/// instance is started.
pub const START_ACTION_ID: &str = "WORKFLOW_START";

/// One transition in an instance's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
  /// The action that fired, or [`START_ACTION_ID`] for the creation entry.
  pub action_id: String,
  /// State the instance left. `None` for the creation entry.
  pub from_state_id: Option<String>,
  /// State the instance entered.
  pub to_state_id: String,
  /// When the transition was applied.
  pub timestamp: DateTime<Utc>,
}

/// A running instance of a workflow definition.
///
/// Occupies exactly one state at a time. The referenced definition is not
/// owned by the instance; it lives in the definition store and is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowInstance {
  pub id: String,
  pub definition_id: String,
  pub current_state_id: String,
  /// Transitions in execution order, starting with the creation entry.
  pub history: Vec<HistoryEntry>,
}
