use serde::{Deserialize, Serialize};

/// A named state within a workflow definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
  /// Unique id within the definition.
  pub id: String,
  pub name: String,
  /// Disabled states cannot be entered by a transition.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Instances are placed on the initial state when started.
  #[serde(default)]
  pub is_initial: bool,
  /// Final states are terminal: no action fires from them.
  #[serde(default)]
  pub is_final: bool,
}

fn default_true() -> bool {
  true
}
