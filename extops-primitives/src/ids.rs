//! Identifier types for extensions and dispatch invocations.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

const MAX_EXTENSION_ID_LEN: usize = 128;

/// Identifier assigned to an installed extension by the browser.
///
/// The browser owns the id format (Chromium uses 32 lowercase letters,
/// other backends differ), so this type only enforces that the value is
/// a non-empty single token.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionId(String);

impl ExtensionId {
    /// Creates an extension identifier after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtensionId`] if the supplied identifier is
    /// empty, too long, or contains whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::InvalidExtensionId {
                id,
                reason: "identifier cannot be empty".into(),
            });
        }
        if id.len() > MAX_EXTENSION_ID_LEN {
            return Err(Error::InvalidExtensionId {
                id,
                reason: format!("identifier length must be <= {MAX_EXTENSION_ID_LEN}"),
            });
        }
        if id.chars().any(char::is_whitespace) {
            return Err(Error::InvalidExtensionId {
                id,
                reason: "identifier cannot contain whitespace".into(),
            });
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExtensionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for ExtensionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl From<ExtensionId> for String {
    fn from(value: ExtensionId) -> Self {
        value.0
    }
}

/// Unique identifier assigned to a single tool dispatch.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Generates a fresh random invocation identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::random()
    }
}

impl Display for InvocationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for InvocationId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_id_accepts_browser_assigned_values() {
        let id = ExtensionId::new("gighmmpiobklfepjocnamgkkbiglidom").expect("id");
        assert_eq!(id.as_str(), "gighmmpiobklfepjocnamgkkbiglidom");
    }

    #[test]
    fn extension_id_rejects_empty_and_whitespace() {
        assert!(ExtensionId::new("").is_err());
        assert!(ExtensionId::new("two words").is_err());
    }

    #[test]
    fn invocation_ids_are_unique() {
        assert_ne!(InvocationId::random(), InvocationId::random());
    }
}
