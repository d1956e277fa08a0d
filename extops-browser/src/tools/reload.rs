//! `reload_extension`: reinstall an unpacked extension from its source
//! directory to pick up local changes.

use async_trait::async_trait;
use extops_dispatch::{
    DefinitionError, FieldKind, HandlerError, HandlerResult, ParameterSchema, ResponseBuilder,
    ToolCategory, ToolDefinition, ToolHandler, ToolParams,
};
use tracing::info;

use crate::context::BrowserContext;
use crate::tools::extension_id;

struct ReloadExtension;

#[async_trait]
impl ToolHandler<dyn BrowserContext> for ReloadExtension {
    async fn run(
        &self,
        params: ToolParams,
        response: &mut ResponseBuilder,
        context: &dyn BrowserContext,
    ) -> HandlerResult {
        let id = extension_id(&params, "id")?;

        let Some(record) = context.get_extension(&id).await else {
            return Err(HandlerError::new(format!(
                "No extension installed with id {id}"
            )));
        };
        let Some(source_path) = record.source_path else {
            return Err(HandlerError::new(format!(
                "Extension {id} was not loaded from a local directory and cannot be reloaded"
            )));
        };

        context.uninstall_extension(&id).await?;
        let new_id = context.install_extension(&source_path).await?;
        info!(old_id = %id, new_id = %new_id, "extension reloaded");

        response.push_line(format!("Extension reloaded. Id: {new_id}"));
        response.set_list_extensions();
        Ok(())
    }
}

/// Builds the `reload_extension` definition.
///
/// # Errors
///
/// Returns [`DefinitionError`] if the definition is malformed.
pub fn definition() -> Result<ToolDefinition<dyn BrowserContext>, DefinitionError> {
    ToolDefinition::builder("reload_extension")
        .description("Reinstalls an unpacked extension from its source directory.")
        .category(ToolCategory::Extensions)
        .mutates(true)
        .schema(ParameterSchema::builder().required(
            "id",
            FieldKind::String,
            "Id of the extension to reload.",
        ).build())
        .handler(ReloadExtension)
        .build()
}
