//! Extension tool definitions invokable through the dispatch layer.

use extops_dispatch::{DefinitionError, HandlerError, ToolParams, ToolRegistry};
use extops_primitives::{ConditionFlag, ExtensionId};

use crate::context::BrowserContext;

pub mod install;
pub mod list;
pub mod reload;
pub mod sidepanel;
pub mod uninstall;

/// Condition flag gating the experimental extension surface.
#[must_use]
pub fn experimental_extension_support() -> ConditionFlag {
    ConditionFlag::new("experimentalExtensionSupport").expect("static flag is well-formed")
}

/// Builds the registry holding every extension tool, in its canonical
/// registration order.
///
/// # Errors
///
/// Returns [`DefinitionError`] if any definition is malformed; this is a
/// startup failure, not a runtime one.
pub fn baseline_registry() -> Result<ToolRegistry<dyn BrowserContext>, DefinitionError> {
    let mut registry = ToolRegistry::new();
    registry.register(install::definition()?)?;
    registry.register(uninstall::definition()?)?;
    registry.register(reload::definition()?)?;
    registry.register(list::definition()?)?;
    registry.register(sidepanel::definition()?)?;
    Ok(registry)
}

/// Parses a validated string parameter into an [`ExtensionId`].
fn extension_id(params: &ToolParams, field: &str) -> Result<ExtensionId, HandlerError> {
    let raw = params
        .str(field)
        .ok_or_else(|| HandlerError::new(format!("missing `{field}` parameter")))?;
    ExtensionId::new(raw).map_err(|err| HandlerError::new(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use extops_primitives::ConditionSet;

    #[test]
    fn baseline_registry_holds_the_five_tools_in_order() {
        let registry = baseline_registry().expect("registry");
        let all: ConditionSet = [experimental_extension_support()].into_iter().collect();
        let names: Vec<_> = registry.list_available(&all).map(|s| s.name).collect();
        assert_eq!(
            names,
            [
                "install_extension",
                "uninstall_extension",
                "reload_extension",
                "list_extensions",
                "open_extension_sidepanel",
            ]
        );
    }

    #[test]
    fn sidepanel_is_the_only_gated_tool() {
        let registry = baseline_registry().expect("registry");
        let names: Vec<_> = registry
            .list_available(&ConditionSet::new())
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            [
                "install_extension",
                "uninstall_extension",
                "reload_extension",
                "list_extensions",
            ]
        );
    }
}
