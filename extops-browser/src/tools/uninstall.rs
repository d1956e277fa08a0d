//! `uninstall_extension`: remove an installed extension.
//!
//! This tool catches its own context failures and renders them as
//! response text instead of surfacing a dispatch error; an unknown id is
//! an expected outcome for the caller, not an exceptional one.

use async_trait::async_trait;
use extops_dispatch::{
    DefinitionError, FieldKind, HandlerResult, ParameterSchema, ResponseBuilder, ToolCategory,
    ToolDefinition, ToolHandler, ToolParams,
};
use tracing::info;

use crate::context::BrowserContext;
use crate::tools::extension_id;

struct UninstallExtension;

#[async_trait]
impl ToolHandler<dyn BrowserContext> for UninstallExtension {
    async fn run(
        &self,
        params: ToolParams,
        response: &mut ResponseBuilder,
        context: &dyn BrowserContext,
    ) -> HandlerResult {
        let id = extension_id(&params, "id")?;

        match context.uninstall_extension(&id).await {
            Ok(()) => {
                info!(%id, "extension uninstalled");
                response.push_line(format!("Extension uninstalled. Id: {id}"));
                response.set_list_extensions();
            }
            Err(err) => {
                response.push_line(format!("Could not uninstall extension {id}: {err}"));
            }
        }
        Ok(())
    }
}

/// Builds the `uninstall_extension` definition.
///
/// # Errors
///
/// Returns [`DefinitionError`] if the definition is malformed.
pub fn definition() -> Result<ToolDefinition<dyn BrowserContext>, DefinitionError> {
    ToolDefinition::builder("uninstall_extension")
        .description("Uninstalls the extension with the given id.")
        .category(ToolCategory::Extensions)
        .mutates(true)
        .schema(ParameterSchema::builder().required(
            "id",
            FieldKind::String,
            "Id of the extension to uninstall.",
        ).build())
        .handler(UninstallExtension)
        .build()
}
