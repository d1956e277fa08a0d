//! Core shared types for the extops tool-dispatch layer.

#![warn(missing_docs, clippy::pedantic)]

mod condition;
mod error;
mod ids;

/// Condition flags gating tool availability.
pub use condition::{ConditionFlag, ConditionSet};
/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Identifier types for extensions and invocations.
pub use ids::{ExtensionId, InvocationId};
