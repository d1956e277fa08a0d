//! Browser-extension tools built on the extops dispatch layer.
//!
//! The [`context::BrowserContext`] trait is the capability surface a
//! browser-automation backend implements; the [`tools`] module holds the
//! tool definitions the automation host invokes against it.

#![warn(missing_docs, clippy::pedantic)]

pub mod context;
pub mod tools;

/// Execution-context interface and its record types.
pub use context::{BrowserContext, ContextError, ContextResult, ExtensionRecord, SidepanelHandle};
/// Tool definitions and the baseline registry factory.
pub use tools::{baseline_registry, experimental_extension_support};
