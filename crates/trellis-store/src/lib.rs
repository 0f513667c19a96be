//! Trellis Store
//!
//! This crate provides the storage trait and in-memory implementation for
//! workflow definitions.
//!
//! Definitions are validated before they are stored and are immutable
//! afterwards, so reads hand out shared views (`Arc<WorkflowDefinition>`)
//! rather than copies. The store is volatile: contents live for the
//! lifetime of the process.

mod memory;

pub use memory::MemoryDefinitionStore;

use std::sync::Arc;

use async_trait::async_trait;
use trellis_workflow::{ValidationError, WorkflowDefinition};

/// Error type for definition storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  /// The submitted definition failed structural validation.
  #[error("invalid workflow definition: {0}")]
  Invalid(#[from] ValidationError),

  /// A definition with the same id already exists.
  #[error("workflow definition '{0}' already exists")]
  Conflict(String),

  /// The requested definition was not found.
  #[error("workflow definition '{0}' not found")]
  NotFound(String),
}

/// Coarse error classification for transport adapters.
///
/// The core returns descriptive error variants; an adapter maps each kind
/// to a transport-level status without matching on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A submitted definition violates a structural invariant.
  ValidationFailed,
  /// A definition id already exists at creation time.
  Conflict,
  /// A referenced definition, instance, or action does not exist.
  NotFound,
  /// A requested transition is disallowed by the current state/action rules.
  IllegalOperation,
  /// A defensive check failed that upstream invariants should make
  /// unreachable; signals corrupted state rather than a bad request.
  InternalInconsistency,
}

impl StoreError {
  /// Classify this error for transport mapping.
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Invalid(_) => ErrorKind::ValidationFailed,
      Self::Conflict(_) => ErrorKind::Conflict,
      Self::NotFound(_) => ErrorKind::NotFound,
    }
  }
}

/// Storage trait for workflow definitions.
#[async_trait]
pub trait DefinitionStore: Send + Sync {
  /// Validate and store a definition.
  ///
  /// Validation runs before any id check, so a structurally broken
  /// definition is rejected even when its id would also conflict. An empty
  /// id is replaced with a freshly generated store-unique id. On failure
  /// nothing is stored.
  async fn create(
    &self,
    definition: WorkflowDefinition,
  ) -> Result<Arc<WorkflowDefinition>, StoreError>;

  /// Get a definition by id.
  async fn get(&self, definition_id: &str) -> Result<Arc<WorkflowDefinition>, StoreError>;

  /// List all stored definitions in insertion order.
  async fn get_all(&self) -> Vec<Arc<WorkflowDefinition>>;

  /// Run the structural checks without storing anything.
  fn validate(&self, definition: &WorkflowDefinition) -> bool {
    definition.is_valid()
  }
}
