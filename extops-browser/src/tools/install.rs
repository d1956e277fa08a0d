//! `install_extension`: load an unpacked extension from a local directory.

use std::path::Path;

use async_trait::async_trait;
use extops_dispatch::{
    DefinitionError, FieldKind, HandlerError, HandlerResult, ParameterSchema, ResponseBuilder,
    ToolCategory, ToolDefinition, ToolHandler, ToolParams,
};
use tracing::info;

use crate::context::BrowserContext;

struct InstallExtension;

#[async_trait]
impl ToolHandler<dyn BrowserContext> for InstallExtension {
    async fn run(
        &self,
        params: ToolParams,
        response: &mut ResponseBuilder,
        context: &dyn BrowserContext,
    ) -> HandlerResult {
        let path = params
            .str("path")
            .ok_or_else(|| HandlerError::new("missing `path` parameter"))?;

        let id = context.install_extension(Path::new(path)).await?;
        info!(%id, path, "extension installed");

        response.push_line(format!("Extension installed. Id: {id}"));
        response.set_list_extensions();
        Ok(())
    }
}

/// Builds the `install_extension` definition.
///
/// # Errors
///
/// Returns [`DefinitionError`] if the definition is malformed.
pub fn definition() -> Result<ToolDefinition<dyn BrowserContext>, DefinitionError> {
    ToolDefinition::builder("install_extension")
        .description("Installs an unpacked extension from a local directory.")
        .category(ToolCategory::Extensions)
        .mutates(true)
        .schema(ParameterSchema::builder().required(
            "path",
            FieldKind::String,
            "Absolute path to the unpacked extension directory.",
        ).build())
        .handler(InstallExtension)
        .build()
}
