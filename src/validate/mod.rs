//! Validation phase.
//!
//! Runtime checks on submitted values (`validate_field`, `validate_step`)
//! plus authoring-time diagnostics on field definitions and canvases.

pub mod definition;
pub mod field_rules;
pub mod structural;

use fancy_regex::Regex;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::parse::types::{FieldDefinition, FieldType, StepDefinition, ValidationRules};

pub use definition::{validate_step_definition, validate_workflow_definition};
pub use structural::validate_canvas;

/// Outcome of validating one value. `error_message` is only ever present when
/// the value is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        ValidationResult {
            is_valid: true,
            error_message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ValidationResult {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Failing fields of a step, keyed by field id in field-definition order.
/// A missing key means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepReport(IndexMap<String, String>);

impl StepReport {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.0.get(field_id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Id of the first failing field, in field-definition order.
    pub fn first_invalid(&self) -> Option<&str> {
        self.0.keys().next().map(String::as_str)
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

/// A field type and its rules, with the custom pattern compiled once.
/// Patterns are browser-side regex sources, so lookaround and
/// backreferences are supported.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    field_type: FieldType,
    rules: ValidationRules,
    pattern: Option<Regex>,
}

impl FieldValidator {
    pub fn new(field_type: FieldType, rules: ValidationRules) -> Self {
        let pattern = rules.pattern.as_deref().and_then(|source| match Regex::new(source) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(pattern = source, error = %e, "ignoring invalid validation pattern");
                None
            }
        });
        FieldValidator {
            field_type,
            rules,
            pattern,
        }
    }

    pub fn for_field(field: &FieldDefinition) -> Self {
        FieldValidator::new(field.field_type.clone(), field.effective_rules())
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Validate a value; `None` stands for an absent (undefined) value.
    pub fn validate(&self, value: Option<&Value>) -> ValidationResult {
        if self.rules.is_required() && is_missing(value) {
            return ValidationResult::invalid("This field is required");
        }

        let Some(value) = value.filter(|v| !is_blank(v)) else {
            return ValidationResult::valid();
        };

        let text = string_form(value);
        match field_rules::check(self, value, text.trim()) {
            Some(message) => ValidationResult::invalid(message),
            None => ValidationResult::valid(),
        }
    }

    pub(crate) fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

/// Validate a single value against a field type and rules.
pub fn validate_field(
    field_type: &FieldType,
    value: Option<&Value>,
    rules: &ValidationRules,
) -> ValidationResult {
    FieldValidator::new(field_type.clone(), rules.clone()).validate(value)
}

/// Validate a whole step's form data. Only failing fields are reported.
pub fn validate_step(fields: &[FieldDefinition], form_data: &Map<String, Value>) -> StepReport {
    let mut report = IndexMap::new();

    for field in fields {
        let result = FieldValidator::for_field(field).validate(form_data.get(&field.id));
        if let Some(message) = result.error_message {
            report.insert(field.id.clone(), message);
        }
    }

    StepReport(report)
}

impl StepDefinition {
    pub fn validate(&self, form_data: &Map<String, Value>) -> StepReport {
        validate_step(&self.fields, form_data)
    }
}

/// Absent for the required check: undefined, null, `""` (untrimmed) or `[]`.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Empty for the optional short-circuit: null or a whitespace-only string.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Text form of a value as a browser form would stringify it.
pub(crate) fn string_form(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(string_form).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
