use serde::{Deserialize, Serialize};

/// A transition rule: fires from any of `from_states` into `to_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
  /// Unique id within the definition.
  pub id: String,
  pub name: String,
  /// Disabled actions never fire.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// State ids this action may fire from.
  pub from_states: Vec<String>,
  /// State id the instance moves to.
  pub to_state: String,
}

fn default_true() -> bool {
  true
}
