//! Declarative tool dispatch for browser-automation hosts.
//!
//! A tool is a named, schema-validated operation bound to an async handler.
//! The registry holds every definition, filters them by the host's active
//! condition flags, validates incoming parameters, and drives each handler
//! against a fresh response builder.

#![warn(missing_docs, clippy::pedantic)]

pub mod registry;
pub mod response;
pub mod schema;
pub mod tool;

/// Registry of tool definitions plus the dispatch pipeline.
pub use registry::{DispatchError, DispatchResult, ToolRegistry, ToolSummary};
/// Per-invocation response accumulation.
pub use response::{Response, ResponseBuilder};
/// Declarative parameter schemas and the validator interpreting them.
pub use schema::{
    FieldIssue, FieldKind, FieldSpec, ParamValue, ParameterSchema, Problem, SchemaBuilder,
    SchemaError, ToolParams, ValidationError,
};
/// Tool definitions, annotations, and the handler trait.
pub use tool::{
    DefinitionError, HandlerError, HandlerResult, ToolAnnotations, ToolCategory, ToolDefinition,
    ToolDefinitionBuilder, ToolHandler,
};
