//! Trellis Workflow
//!
//! This crate provides the definition model for Trellis: a workflow
//! definition is a small state machine — a set of named states (exactly one
//! initial, any number final) and a set of actions that move an instance
//! between them.
//!
//! Definitions are validated as a whole before they become visible to the
//! rest of the system, and are immutable afterwards:
//! - State and action ids are unique within the definition
//! - Exactly one state is flagged initial
//! - Every state an action references exists in the definition

mod action;
mod error;
mod state;
mod workflow;

pub use action::Action;
pub use error::ValidationError;
pub use state::State;
pub use workflow::WorkflowDefinition;
