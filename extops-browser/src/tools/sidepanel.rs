//! `open_extension_sidepanel`: open an extension's side panel.
//!
//! Gated on the `experimentalExtensionSupport` condition: without the
//! flag the tool is invisible and dispatches as if it never existed.

use async_trait::async_trait;
use extops_dispatch::{
    DefinitionError, FieldKind, HandlerResult, ParameterSchema, ResponseBuilder, ToolCategory,
    ToolDefinition, ToolHandler, ToolParams,
};
use tracing::info;

use crate::context::BrowserContext;
use crate::tools::{experimental_extension_support, extension_id};

struct OpenExtensionSidepanel;

#[async_trait]
impl ToolHandler<dyn BrowserContext> for OpenExtensionSidepanel {
    async fn run(
        &self,
        params: ToolParams,
        response: &mut ResponseBuilder,
        context: &dyn BrowserContext,
    ) -> HandlerResult {
        let id = extension_id(&params, "id")?;

        let panel = context.open_extension_sidepanel(&id).await?;
        info!(%id, url = %panel.url, "side panel opened");

        response.push_line(format!("Side panel opened: {}", panel.url));
        if let Some(note) = panel.note {
            response.push_line(note);
        }
        if let Some(window_id) = panel.window_id {
            response.push_line(format!("Window: {window_id}"));
        }
        response.set_include_pages(true);
        Ok(())
    }
}

/// Builds the `open_extension_sidepanel` definition.
///
/// # Errors
///
/// Returns [`DefinitionError`] if the definition is malformed.
pub fn definition() -> Result<ToolDefinition<dyn BrowserContext>, DefinitionError> {
    ToolDefinition::builder("open_extension_sidepanel")
        .description("Opens the side panel of the extension with the given id.")
        .category(ToolCategory::Debugging)
        .mutates(false)
        .condition(experimental_extension_support())
        .schema(ParameterSchema::builder().required(
            "id",
            FieldKind::String,
            "Id of the extension whose side panel to open.",
        ).build())
        .handler(OpenExtensionSidepanel)
        .build()
}
