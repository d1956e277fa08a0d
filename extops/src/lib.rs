//! Facade crate for the extops tool-dispatch layer.
//!
//! Depend on this crate via `cargo add extops`. It bundles the workspace
//! crates behind feature flags so an embedding host can pull in only the
//! pieces it needs.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use extops_primitives as primitives;

/// Tool registry and dispatch pipeline (enabled by `dispatch` feature).
#[cfg(feature = "dispatch")]
pub use extops_dispatch as dispatch;

/// Browser context interface and extension tools (enabled by `browser`
/// feature).
#[cfg(feature = "browser")]
pub use extops_browser as browser;
