//! Trellis Engine
//!
//! This crate runs instances of workflow definitions. An instance is a
//! single token on its definition's state machine: [`InstanceEngine::start`]
//! places it on the initial state, and
//! [`InstanceEngine::execute_action`] moves it along an enabled action whose
//! source states include the current one. Final states are terminal — no
//! action fires from them.
//!
//! Every transition is recorded in the instance's history, in execution
//! order. A failed call never mutates the instance: state and history only
//! change together, on success.

mod engine;
mod error;
mod instance;

pub use engine::InstanceEngine;
pub use error::EngineError;
pub use instance::{HistoryEntry, START_ACTION_ID, WorkflowInstance};
