//! Declarative parameter schemas and the validator that interprets them.
//!
//! A schema is plain data: every accepted key, its primitive kind, whether
//! it is required, and a description. The same data validates incoming
//! payloads and documents the tool to the calling host. The schema is
//! closed: keys it does not declare are rejected so a typo never silently
//! disappears.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Primitive kind a parameter value must have.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// UTF-8 string.
    String,
    /// `true` or `false`.
    Boolean,
    /// Whole number representable as `i64`.
    Integer,
    /// Any JSON number.
    Number,
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
        };
        f.write_str(name)
    }
}

/// One declared parameter: name, kind, requiredness, description.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    required: bool,
    description: String,
}

impl FieldSpec {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the expected primitive kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns `true` when the parameter must be present.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Errors detected while declaring a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A field was declared with an empty name.
    #[error("schema field name cannot be empty")]
    EmptyFieldName,

    /// The same field name was declared twice.
    #[error("schema field `{name}` is declared more than once")]
    DuplicateField {
        /// Name of the offending field.
        name: String,
    },
}

/// Closed set of parameters a tool accepts.
///
/// Field order is the declaration order; it carries through to the
/// introspection surface so tool listings stay stable.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSchema {
    fields: Vec<FieldSpec>,
}

impl ParameterSchema {
    /// Starts declaring a schema.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Returns a schema that accepts only the empty payload.
    #[must_use]
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Returns the declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates a raw payload against this schema.
    ///
    /// `Value::Null` is treated as the empty payload, matching hosts that
    /// omit the arguments object entirely. All problems are collected into
    /// one error rather than stopping at the first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the payload is not an object, a
    /// required field is missing, a value has the wrong kind, or an
    /// undeclared key is present.
    pub fn validate(&self, raw: &Value) -> Result<ToolParams, ValidationError> {
        let empty = serde_json::Map::new();
        let object = match raw {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(ValidationError::NotAnObject {
                    got: json_kind(other),
                });
            }
        };

        let mut issues = Vec::new();
        let mut values = BTreeMap::new();

        for field in &self.fields {
            match object.get(&field.name) {
                Some(value) => match coerce(field.kind, value) {
                    Some(param) => {
                        values.insert(field.name.clone(), param);
                    }
                    None => issues.push(FieldIssue {
                        field: field.name.clone(),
                        problem: Problem::WrongKind {
                            expected: field.kind,
                            got: json_kind(value),
                        },
                    }),
                },
                None if field.required => issues.push(FieldIssue {
                    field: field.name.clone(),
                    problem: Problem::MissingRequired,
                }),
                None => {}
            }
        }

        for key in object.keys() {
            if self.field(key).is_none() {
                issues.push(FieldIssue {
                    field: key.clone(),
                    problem: Problem::Unexpected,
                });
            }
        }

        if issues.is_empty() {
            Ok(ToolParams { values })
        } else {
            Err(ValidationError::Fields { issues })
        }
    }
}

/// Builder collecting field declarations for a [`ParameterSchema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Declares a required field.
    #[must_use]
    pub fn required(
        self,
        name: impl Into<String>,
        kind: FieldKind,
        description: impl Into<String>,
    ) -> Self {
        self.push(name.into(), kind, true, description.into())
    }

    /// Declares an optional field.
    #[must_use]
    pub fn optional(
        self,
        name: impl Into<String>,
        kind: FieldKind,
        description: impl Into<String>,
    ) -> Self {
        self.push(name.into(), kind, false, description.into())
    }

    fn push(mut self, name: String, kind: FieldKind, required: bool, description: String) -> Self {
        self.fields.push(FieldSpec {
            name,
            kind,
            required,
            description,
        });
        self
    }

    /// Finalises the schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when a field name is empty or declared twice.
    pub fn build(self) -> Result<ParameterSchema, SchemaError> {
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(ParameterSchema {
            fields: self.fields,
        })
    }
}

/// Typed value produced by validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// String parameter.
    Str(String),
    /// Boolean parameter.
    Bool(bool),
    /// Integer parameter.
    Int(i64),
    /// Floating-point parameter.
    Num(f64),
}

/// Schema-shaped parameters handed to a handler.
///
/// Contains exactly the declared keys that were present in the payload;
/// validation has already confirmed kinds and requiredness.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToolParams {
    values: BTreeMap<String, ParamValue>,
}

impl ToolParams {
    /// Returns a string parameter, if present.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns a boolean parameter, if present.
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ParamValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns an integer parameter, if present.
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ParamValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Returns a number parameter, if present.
    #[must_use]
    pub fn num(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ParamValue::Num(n)) => Some(*n),
            Some(ParamValue::Int(i)) => {
                #[allow(clippy::cast_precision_loss)]
                Some(*i as f64)
            }
            _ => None,
        }
    }

    /// Returns `true` when no parameters were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn coerce(kind: FieldKind, value: &Value) -> Option<ParamValue> {
    match (kind, value) {
        (FieldKind::String, Value::String(s)) => Some(ParamValue::Str(s.clone())),
        (FieldKind::Boolean, Value::Bool(b)) => Some(ParamValue::Bool(*b)),
        (FieldKind::Integer, Value::Number(n)) => n.as_i64().map(ParamValue::Int),
        (FieldKind::Number, Value::Number(n)) => n.as_f64().map(ParamValue::Num),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One validation problem tied to a field name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldIssue {
    /// Name of the offending field.
    pub field: String,
    /// What was wrong with it.
    pub problem: Problem,
}

impl Display for FieldIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Kind of validation problem.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    /// A required field was absent.
    MissingRequired,
    /// The payload contained a key the schema does not declare.
    Unexpected,
    /// The value had the wrong primitive kind.
    WrongKind {
        /// Kind the schema declares.
        expected: FieldKind,
        /// Kind actually supplied.
        got: &'static str,
    },
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired => f.write_str("required field is missing"),
            Self::Unexpected => f.write_str("unexpected field"),
            Self::WrongKind { expected, got } => write!(f, "expected {expected}, got {got}"),
        }
    }
}

/// Rejection of a raw payload, naming every offending field.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The payload was not a JSON object.
    #[error("parameters must be a JSON object, got {got}")]
    NotAnObject {
        /// Kind actually supplied.
        got: &'static str,
    },

    /// One or more fields failed validation.
    #[error("parameter validation failed: {}", render_issues(.issues))]
    Fields {
        /// Every collected problem.
        issues: Vec<FieldIssue>,
    },
}

impl ValidationError {
    /// Returns `true` when the error mentions the given field.
    #[must_use]
    pub fn names_field(&self, name: &str) -> bool {
        match self {
            Self::NotAnObject { .. } => false,
            Self::Fields { issues } => issues.iter().any(|i| i.field == name),
        }
    }
}

fn render_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
