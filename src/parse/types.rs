//! Rust types mirroring the admin UI's form and canvas models.
//!
//! These types are the serde target for the frontend JSON: field
//! definitions, workflow/step definitions, and the workflow canvas.

use serde::{Deserialize, Serialize};

// =============================================================================
// FIELD TYPES
// =============================================================================

/// Declared type of a form field.
///
/// Unknown tags are kept in [`FieldType::Other`] and get the default checks
/// (length limits only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Url,
    Phone,
    Date,
    Time,
    Number,
    Select,
    Checkbox,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Email => "email",
            FieldType::Url => "url",
            FieldType::Phone => "phone",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Other(tag) => tag,
        }
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => FieldType::Text,
            "textarea" => FieldType::Textarea,
            "email" => FieldType::Email,
            "url" => FieldType::Url,
            "phone" => FieldType::Phone,
            "date" => FieldType::Date,
            "time" => FieldType::Time,
            "number" => FieldType::Number,
            "select" => FieldType::Select,
            "checkbox" => FieldType::Checkbox,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from(tag.as_str())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// VALIDATION RULES
// =============================================================================

/// Declarative constraints attached to a field. Every key is optional and any
/// combination is accepted; each field type only reads the keys it applies.
///
/// Form builders send loosely typed values, so `required` follows browser
/// truthiness (an explicit `null` means "not required") and numeric bounds
/// accept numbers or numeric strings. A bound of any other shape is treated
/// as absent rather than failing the whole definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default, deserialize_with = "lenient::truthy", skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(
        default,
        alias = "min_length",
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_length: Option<usize>,
    #[serde(
        default,
        alias = "max_length",
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_length: Option<usize>,
    /// Regex source. Unanchored; an uncompilable pattern is ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl ValidationRules {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_length(mut self, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Present key → browser truthiness of its value (`null` is false).
    pub fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(Some(match value {
            Value::Null => false,
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }))
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(as_f64(&Value::deserialize(d)?))
    }

    /// Whole, non-negative counts only; `10.0` and `"10"` are accepted.
    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
        let n = as_f64(&Value::deserialize(d)?);
        Ok(n.filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= usize::MAX as f64)
            .map(|f| f as usize))
    }

    fn as_f64(value: &Value) -> Option<f64> {
        let n = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        n.filter(|f| f.is_finite())
    }
}

// =============================================================================
// FIELD / STEP / WORKFLOW DEFINITIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub validation: ValidationRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldDefinition {
    pub fn new(id: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        FieldDefinition {
            id: id.into(),
            field_type: field_type.into(),
            label: None,
            required: false,
            validation: ValidationRules::default(),
            options: None,
        }
    }

    /// Rules the validator actually applies to this field.
    ///
    /// Merge order: field-level `required` first, overridden by an explicit
    /// `validation.required`; then the field-level `options` list, which
    /// always replaces `validation.options` (even when absent).
    pub fn effective_rules(&self) -> ValidationRules {
        let mut rules = self.validation.clone();
        rules.required = Some(self.validation.required.unwrap_or(self.required));
        rules.options = self.options.clone();
        rules
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

impl WorkflowDefinition {
    pub fn step(&self, step_id: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|s| s.id == step_id)
    }
}

// =============================================================================
// CANVAS
// =============================================================================

/// One placed workflow box on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub workflow_id: String,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, workflow_id: impl Into<String>) -> Self {
        GraphNode {
            id: id.into(),
            workflow_id: workflow_id.into(),
        }
    }
}

/// Directed connection between two canvas nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    #[serde(alias = "source")]
    pub source_id: String,
    #[serde(alias = "target")]
    pub target_id: String,
}

impl GraphEdge {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        GraphEdge {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}
