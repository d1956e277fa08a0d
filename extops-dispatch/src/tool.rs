//! Tool definitions: the immutable contract binding a name, a parameter
//! schema, annotation metadata, and an async handler.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use extops_primitives::{ConditionFlag, ConditionSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::response::ResponseBuilder;
use crate::schema::{ParameterSchema, SchemaError, ToolParams};

/// Category tag used for grouping in tool listings.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    /// Extension install, uninstall, and inventory operations.
    Extensions,
    /// Developer-facing debugging surfaces.
    Debugging,
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Extensions => "extensions",
            Self::Debugging => "debugging",
        };
        f.write_str(name)
    }
}

/// Annotation metadata carried by a tool definition.
///
/// `mutates` is advisory only, for the host's own safety policies. The
/// dispatcher acts on nothing here except `conditions`.
#[derive(Clone, Debug, Serialize)]
pub struct ToolAnnotations {
    category: ToolCategory,
    mutates: bool,
    #[serde(skip_serializing_if = "ConditionSet::is_empty")]
    conditions: ConditionSet,
}

impl ToolAnnotations {
    /// Returns the category tag.
    #[must_use]
    pub const fn category(&self) -> ToolCategory {
        self.category
    }

    /// Returns the advisory mutability hint.
    #[must_use]
    pub const fn mutates(&self) -> bool {
        self.mutates
    }

    /// Returns the condition flags gating this tool.
    #[must_use]
    pub const fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }
}

/// Failure raised by a handler's domain operation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a handler error with the supplied message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result alias for handler bodies.
pub type HandlerResult = Result<(), HandlerError>;

/// Async handler executing one tool invocation.
///
/// The context type is the only place side effects originate; handlers
/// receive it by reference per invocation and never own it. `C` is
/// usually a trait object supplied by the embedding crate.
#[async_trait]
pub trait ToolHandler<C: ?Sized>: Send + Sync {
    /// Runs the tool against validated parameters.
    ///
    /// Output goes into `response`; an `Err` is converted by the
    /// dispatcher into a structured dispatch failure. A handler may
    /// instead render its own failure text into `response` and return
    /// `Ok` — in that case the rendered text must not be empty.
    async fn run(
        &self,
        params: ToolParams,
        response: &mut ResponseBuilder,
        context: &C,
    ) -> HandlerResult;
}

/// Structural mistake in a tool definition.
///
/// Always raised at construction or registration time, never during an
/// invocation, so a process that starts cleanly has a well-formed registry.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The tool name was empty.
    #[error("tool name cannot be empty")]
    EmptyName,

    /// The tool description was empty.
    #[error("tool `{name}` has an empty description")]
    EmptyDescription {
        /// Name of the offending tool.
        name: String,
    },

    /// No handler was supplied.
    #[error("tool `{name}` has no handler")]
    MissingHandler {
        /// Name of the offending tool.
        name: String,
    },

    /// The parameter schema was malformed.
    #[error("tool `{name}` has a malformed schema: {source}")]
    Schema {
        /// Name of the offending tool.
        name: String,
        /// Underlying schema error.
        source: SchemaError,
    },

    /// Tool name collided with an existing registration.
    #[error("tool `{name}` is already registered")]
    DuplicateTool {
        /// Name of the offending tool.
        name: String,
    },
}

/// Immutable record describing one invokable tool.
pub struct ToolDefinition<C: ?Sized> {
    name: String,
    description: String,
    annotations: ToolAnnotations,
    schema: ParameterSchema,
    handler: Arc<dyn ToolHandler<C>>,
}

impl<C: ?Sized> Clone for ToolDefinition<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            annotations: self.annotations.clone(),
            schema: self.schema.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<C: ?Sized> fmt::Debug for ToolDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

impl<C: ?Sized> ToolDefinition<C> {
    /// Starts building a definition for the supplied name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ToolDefinitionBuilder<C> {
        ToolDefinitionBuilder {
            name: name.into(),
            description: None,
            category: ToolCategory::Extensions,
            mutates: false,
            conditions: ConditionSet::new(),
            schema: ParameterSchema::empty(),
            schema_err: None,
            handler: None,
        }
    }

    /// Returns the unique tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the annotation metadata.
    #[must_use]
    pub const fn annotations(&self) -> &ToolAnnotations {
        &self.annotations
    }

    /// Returns the parameter schema.
    #[must_use]
    pub const fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    pub(crate) fn handler(&self) -> &dyn ToolHandler<C> {
        self.handler.as_ref()
    }
}

/// Builder for [`ToolDefinition`].
pub struct ToolDefinitionBuilder<C: ?Sized> {
    name: String,
    description: Option<String>,
    category: ToolCategory,
    mutates: bool,
    conditions: ConditionSet,
    schema: ParameterSchema,
    schema_err: Option<SchemaError>,
    handler: Option<Arc<dyn ToolHandler<C>>>,
}

impl<C: ?Sized> ToolDefinitionBuilder<C> {
    /// Sets the human-readable description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category tag.
    #[must_use]
    pub fn category(mut self, category: ToolCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the advisory mutability hint.
    #[must_use]
    pub fn mutates(mut self, mutates: bool) -> Self {
        self.mutates = mutates;
        self
    }

    /// Adds a condition flag that must be active for the tool to exist.
    #[must_use]
    pub fn condition(mut self, flag: ConditionFlag) -> Self {
        self.conditions.insert(flag);
        self
    }

    /// Sets the parameter schema. Schema builder failures are deferred
    /// and surface from [`Self::build`].
    #[must_use]
    pub fn schema(mut self, schema: Result<ParameterSchema, SchemaError>) -> Self {
        match schema {
            Ok(schema) => self.schema = schema,
            Err(err) => self.schema_err = Some(err),
        }
        self
    }

    /// Sets the handler executed on dispatch.
    #[must_use]
    pub fn handler(mut self, handler: impl ToolHandler<C> + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Finalises the definition.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when the name or description is empty,
    /// the schema was malformed, or no handler was supplied.
    pub fn build(self) -> Result<ToolDefinition<C>, DefinitionError> {
        if self.name.trim().is_empty() {
            return Err(DefinitionError::EmptyName);
        }
        if let Some(source) = self.schema_err {
            return Err(DefinitionError::Schema {
                name: self.name,
                source,
            });
        }
        let description = match self.description {
            Some(d) if !d.trim().is_empty() => d,
            _ => {
                return Err(DefinitionError::EmptyDescription { name: self.name });
            }
        };
        let Some(handler) = self.handler else {
            return Err(DefinitionError::MissingHandler { name: self.name });
        };

        Ok(ToolDefinition {
            name: self.name,
            description,
            annotations: ToolAnnotations {
                category: self.category,
                mutates: self.mutates,
                conditions: self.conditions,
            },
            schema: self.schema,
            handler,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    struct Noop;

    #[async_trait]
    impl ToolHandler<()> for Noop {
        async fn run(
            &self,
            _params: ToolParams,
            _response: &mut ResponseBuilder,
            _context: &(),
        ) -> HandlerResult {
            Ok(())
        }
    }

    #[test]
    fn builds_well_formed_definition() {
        let def: ToolDefinition<()> = ToolDefinition::builder("install_extension")
            .description("Installs an extension.")
            .mutates(true)
            .schema(
                ParameterSchema::builder()
                    .required("path", FieldKind::String, "Directory")
                    .build(),
            )
            .handler(Noop)
            .build()
            .expect("definition");

        assert_eq!(def.name(), "install_extension");
        assert!(def.annotations().mutates());
        assert_eq!(def.schema().fields().len(), 1);
    }

    #[test]
    fn empty_name_fails_fast() {
        let err = ToolDefinition::<()>::builder("  ")
            .description("x")
            .handler(Noop)
            .build()
            .expect_err("empty name");
        assert!(matches!(err, DefinitionError::EmptyName));
    }

    #[test]
    fn malformed_schema_fails_fast() {
        let err = ToolDefinition::<()>::builder("t")
            .description("x")
            .schema(
                ParameterSchema::builder()
                    .required("a", FieldKind::String, "one")
                    .required("a", FieldKind::String, "two")
                    .build(),
            )
            .handler(Noop)
            .build()
            .expect_err("duplicate field");
        assert!(matches!(err, DefinitionError::Schema { .. }));
    }

    #[test]
    fn missing_handler_fails_fast() {
        let err = ToolDefinition::<()>::builder("t")
            .description("x")
            .build()
            .expect_err("no handler");
        assert!(matches!(err, DefinitionError::MissingHandler { .. }));
    }
}
