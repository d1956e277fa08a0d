//! Condition flags gating which tools a host may see and call.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const MAX_FLAG_LEN: usize = 64;

/// Named capability flag a tool may require before it is exposed.
///
/// Flags are host-supplied toggles such as `experimentalExtensionSupport`;
/// a tool listing them in its annotations stays hidden until every flag is
/// active.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionFlag(String);

impl ConditionFlag {
    /// Creates a condition flag after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConditionFlag`] if the flag is empty, too
    /// long, or contains characters outside `[A-Za-z0-9_.-]`.
    pub fn new(flag: impl Into<String>) -> Result<Self> {
        let flag = flag.into();
        if flag.is_empty() {
            return Err(Error::InvalidConditionFlag {
                flag,
                reason: "flag cannot be empty".into(),
            });
        }
        if flag.len() > MAX_FLAG_LEN {
            return Err(Error::InvalidConditionFlag {
                flag,
                reason: format!("flag length must be <= {MAX_FLAG_LEN}"),
            });
        }
        if !flag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(Error::InvalidConditionFlag {
                flag,
                reason: "flag must contain alphanumeric, dash, underscore, or dot".into(),
            });
        }
        Ok(Self(flag))
    }

    /// Returns the flag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ConditionFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Set of condition flags active for the current host session.
///
/// Read fresh on every list or dispatch call; never cached inside a tool
/// definition.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionSet(BTreeSet<ConditionFlag>);

impl ConditionSet {
    /// Creates an empty condition set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flag to the set.
    pub fn insert(&mut self, flag: ConditionFlag) {
        self.0.insert(flag);
    }

    /// Removes a flag from the set, returning whether it was present.
    pub fn remove(&mut self, flag: &ConditionFlag) -> bool {
        self.0.remove(flag)
    }

    /// Returns `true` when the flag is active.
    #[must_use]
    pub fn contains(&self, flag: &ConditionFlag) -> bool {
        self.0.contains(flag)
    }

    /// Returns `true` when every flag in `required` is active in `self`.
    #[must_use]
    pub fn satisfies(&self, required: &ConditionSet) -> bool {
        required.0.is_subset(&self.0)
    }

    /// Returns `true` when no flags are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the active flags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ConditionFlag> {
        self.0.iter()
    }
}

impl FromIterator<ConditionFlag> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = ConditionFlag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(s: &str) -> ConditionFlag {
        ConditionFlag::new(s).expect("flag")
    }

    #[test]
    fn flag_validation() {
        assert!(ConditionFlag::new("experimentalExtensionSupport").is_ok());
        assert!(ConditionFlag::new("").is_err());
        assert!(ConditionFlag::new("has space").is_err());
    }

    #[test]
    fn empty_requirements_are_always_satisfied() {
        let active = ConditionSet::new();
        assert!(active.satisfies(&ConditionSet::new()));
    }

    #[test]
    fn satisfies_requires_subset() {
        let active: ConditionSet = [flag("a"), flag("b")].into_iter().collect();
        let required: ConditionSet = [flag("a")].into_iter().collect();
        let unmet: ConditionSet = [flag("a"), flag("c")].into_iter().collect();

        assert!(active.satisfies(&required));
        assert!(!active.satisfies(&unmet));
    }
}
