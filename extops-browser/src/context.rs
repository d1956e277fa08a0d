//! Capability surface a browser-automation backend provides.
//!
//! The dispatch layer never talks to a browser directly; handlers call
//! this trait, and the embedding process supplies the implementation.
//! The backend owns its own serialization and timeout policy — a slow or
//! conflicting operation surfaces here as a plain error.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use extops_dispatch::HandlerError;
use extops_primitives::ExtensionId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for context capabilities.
pub type ContextResult<T> = Result<T, ContextError>;

/// Failure raised by a context capability.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The path did not point at an installable unpacked extension.
    #[error("cannot install extension from `{path}`: {reason}")]
    Install {
        /// Supplied directory path.
        path: PathBuf,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// No extension with the supplied id is installed.
    #[error("no extension with id `{id}`")]
    UnknownExtension {
        /// The unknown identifier.
        id: ExtensionId,
    },

    /// The extension cannot show a side panel.
    #[error("cannot open side panel for `{id}`: {reason}")]
    Sidepanel {
        /// Target extension identifier.
        id: ExtensionId,
        /// Missing worker, missing manifest entry, and so on.
        reason: String,
    },

    /// The browser backend itself failed.
    #[error("browser backend error: {reason}")]
    Backend {
        /// Human-readable backend failure.
        reason: String,
    },
}

impl From<ContextError> for HandlerError {
    fn from(err: ContextError) -> Self {
        HandlerError::new(err.to_string())
    }
}

/// Installed-extension record as reported by the backend.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    /// Browser-assigned identifier.
    pub id: ExtensionId,
    /// Display name from the extension manifest.
    pub name: String,
    /// Manifest version string.
    pub version: String,
    /// Whether the extension is currently enabled.
    pub enabled: bool,
    /// Directory the extension was loaded from, when it was installed
    /// unpacked. `None` for store-installed extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

/// Result of opening an extension's side panel.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SidepanelHandle {
    /// URL the side panel rendered.
    pub url: String,
    /// Optional note from the backend (for example, that the panel
    /// opened in a new window).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Browser window the panel is attached to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<u64>,
}

/// Capabilities a browser-automation backend exposes to extension tools.
///
/// Implementations live outside this crate and are handed to the
/// dispatcher per invocation. They must be safe for concurrent calls or
/// document themselves as single-call-at-a-time.
#[async_trait]
pub trait BrowserContext: Send + Sync {
    /// Installs an unpacked extension from a local directory.
    async fn install_extension(&self, path: &Path) -> ContextResult<ExtensionId>;

    /// Uninstalls the extension with the supplied id.
    async fn uninstall_extension(&self, id: &ExtensionId) -> ContextResult<()>;

    /// Looks up an installed extension. Absence is a valid result, not
    /// an error.
    async fn get_extension(&self, id: &ExtensionId) -> Option<ExtensionRecord>;

    /// Opens the extension's side panel.
    async fn open_extension_sidepanel(&self, id: &ExtensionId) -> ContextResult<SidepanelHandle>;
}
