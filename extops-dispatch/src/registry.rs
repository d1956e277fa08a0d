//! Registry holding tool definitions plus the dispatch pipeline.

use std::collections::HashMap;
use std::fmt;

use extops_primitives::{ConditionSet, InvocationId};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::response::{Response, ResponseBuilder};
use crate::schema::{ParameterSchema, ValidationError};
use crate::tool::{DefinitionError, HandlerError, ToolCategory, ToolDefinition};

/// Result alias for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Failure returned to the calling host for one invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No tool with that name is available to this caller.
    ///
    /// Raised identically for names that were never registered and for
    /// registered tools gated out by their conditions, so a gated tool
    /// never leaks its existence.
    #[error("tool `{name}` is not available")]
    NotFound {
        /// Requested tool name.
        name: String,
    },

    /// The supplied parameters violated the tool's schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The handler's domain operation failed.
    #[error("tool execution failed: {source}")]
    Handler {
        /// Underlying handler failure.
        #[from]
        source: HandlerError,
    },
}

/// Introspection record describing one available tool.
#[derive(Clone, Debug, Serialize)]
pub struct ToolSummary {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Category tag for grouping.
    pub category: ToolCategory,
    /// Advisory mutability hint.
    pub mutates: bool,
    /// Declared parameter schema; doubles as caller documentation.
    pub schema: ParameterSchema,
}

/// Ordered collection of tool definitions keyed by name.
///
/// Populated once at startup and read-only afterwards; condition gating
/// is re-evaluated against the caller's active set on every call rather
/// than baked in at registration.
pub struct ToolRegistry<C: ?Sized> {
    entries: Vec<ToolDefinition<C>>,
    index: HashMap<String, usize>,
}

impl<C: ?Sized> Default for ToolRegistry<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for ToolRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.entries.iter().map(ToolDefinition::name).collect();
        f.debug_struct("ToolRegistry")
            .field("registered", &names)
            .finish()
    }
}

impl<C: ?Sized> ToolRegistry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool definition.
    ///
    /// Registration order is the order tools appear in listings.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::DuplicateTool`] if the name is already
    /// present; the registry is left unchanged in that case.
    pub fn register(&mut self, definition: ToolDefinition<C>) -> Result<(), DefinitionError> {
        let name = definition.name().to_owned();
        if self.index.contains_key(&name) {
            return Err(DefinitionError::DuplicateTool { name });
        }
        debug!(tool = %name, "registered tool");
        self.index.insert(name, self.entries.len());
        self.entries.push(definition);
        Ok(())
    }

    /// Returns the number of registered definitions, gated or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no definitions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, name: &str, active: &ConditionSet) -> Option<&ToolDefinition<C>> {
        let definition = self.index.get(name).map(|&i| &self.entries[i])?;
        active
            .satisfies(definition.annotations().conditions())
            .then_some(definition)
    }

    /// Iterates over the tools visible under the supplied condition set,
    /// in registration order.
    ///
    /// The iterator is lazy and restartable; conditions are evaluated
    /// against `active` as it is now, never cached.
    pub fn list_available<'a>(
        &'a self,
        active: &'a ConditionSet,
    ) -> impl Iterator<Item = ToolSummary> + 'a {
        self.entries
            .iter()
            .filter(|def| active.satisfies(def.annotations().conditions()))
            .map(summarize)
    }

    /// Lists visible tools grouped by category.
    ///
    /// The sort is stable, so tools within one category keep their
    /// registration order.
    #[must_use]
    pub fn list_grouped(&self, active: &ConditionSet) -> Vec<ToolSummary> {
        let mut summaries: Vec<_> = self.list_available(active).collect();
        summaries.sort_by_key(|s| s.category);
        summaries
    }

    /// Dispatches one invocation: resolve, validate, execute, respond.
    ///
    /// Exactly one handler execution occurs per call; nothing is retried.
    /// The handler may suspend while awaiting context capabilities; this
    /// method awaits its completion.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotFound`] for unknown or gated-out
    /// names, [`DispatchError::Validation`] when the payload violates the
    /// schema (the handler is never entered), or
    /// [`DispatchError::Handler`] when the handler signals a failure it
    /// did not render itself.
    pub async fn dispatch(
        &self,
        name: &str,
        raw_params: Value,
        active: &ConditionSet,
        context: &C,
    ) -> DispatchResult<Response> {
        let Some(definition) = self.resolve(name, active) else {
            warn!(tool = %name, "dispatch of unavailable tool");
            return Err(DispatchError::NotFound {
                name: name.to_owned(),
            });
        };

        let params = definition.schema().validate(&raw_params)?;

        let invocation = InvocationId::random();
        let mut builder = ResponseBuilder::new(invocation);
        debug!(tool = %name, %invocation, "dispatching tool");

        if let Err(source) = definition.handler().run(params, &mut builder, context).await {
            warn!(tool = %name, %invocation, error = %source, "tool handler failed");
            return Err(DispatchError::Handler { source });
        }

        debug!(tool = %name, %invocation, "tool completed");
        Ok(builder.finalize())
    }
}

fn summarize<C: ?Sized>(definition: &ToolDefinition<C>) -> ToolSummary {
    ToolSummary {
        name: definition.name().to_owned(),
        description: definition.description().to_owned(),
        category: definition.annotations().category(),
        mutates: definition.annotations().mutates(),
        schema: definition.schema().clone(),
    }
}
