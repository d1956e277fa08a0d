//! `list_extensions`: surface the installed-extension inventory.
//!
//! The handler only records the request; the renderer owns the actual
//! inventory data and appends it when the flag is set.

use async_trait::async_trait;
use extops_dispatch::{
    DefinitionError, HandlerResult, ParameterSchema, ResponseBuilder, ToolCategory,
    ToolDefinition, ToolHandler, ToolParams,
};

use crate::context::BrowserContext;

struct ListExtensions;

#[async_trait]
impl ToolHandler<dyn BrowserContext> for ListExtensions {
    async fn run(
        &self,
        _params: ToolParams,
        response: &mut ResponseBuilder,
        _context: &dyn BrowserContext,
    ) -> HandlerResult {
        response.set_list_extensions();
        Ok(())
    }
}

/// Builds the `list_extensions` definition.
///
/// # Errors
///
/// Returns [`DefinitionError`] if the definition is malformed.
pub fn definition() -> Result<ToolDefinition<dyn BrowserContext>, DefinitionError> {
    ToolDefinition::builder("list_extensions")
        .description("Lists the currently installed extensions.")
        .category(ToolCategory::Extensions)
        .mutates(false)
        .schema(Ok(ParameterSchema::empty()))
        .handler(ListExtensions)
        .build()
}
