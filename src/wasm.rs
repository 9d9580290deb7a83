//! WASM entry points for browser use.
//!
//! Every entry point takes JSON strings and returns a plain JS value. Calls
//! that can fail to parse their input return `{status: "errors", errors}`;
//! the rest return `{status: "success", result}`.

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::error::DefinitionError;
use crate::parse::{self, FieldType, ValidationRules};
use crate::validate::{StepReport, ValidationResult};

/// Validate one value. An empty `value_json` means `undefined`; an empty
/// `rules_json` means no rules.
#[wasm_bindgen]
pub fn validate_field(field_type: &str, value_json: &str, rules_json: &str) -> JsValue {
    to_js(&validate_field_inner(field_type, value_json, rules_json))
}

fn validate_field_inner(
    field_type: &str,
    value_json: &str,
    rules_json: &str,
) -> Outcome<ValidationResult> {
    let mut errors = Vec::new();

    let value = if value_json.trim().is_empty() {
        None
    } else {
        match serde_json::from_str::<Value>(value_json) {
            Ok(v) => Some(v),
            Err(e) => {
                errors.push(ErrorDto::from(DefinitionError::parse(
                    "P001",
                    format!("Failed to parse value JSON: {}", e),
                )));
                None
            }
        }
    };

    let rules = if rules_json.trim().is_empty() {
        ValidationRules::default()
    } else {
        match serde_json::from_str::<ValidationRules>(rules_json) {
            Ok(r) => r,
            Err(e) => {
                errors.push(ErrorDto::from(DefinitionError::parse(
                    "P001",
                    format!("Failed to parse validation rules JSON: {}", e),
                )));
                ValidationRules::default()
            }
        }
    };

    if !errors.is_empty() {
        return Outcome::Errors { errors };
    }

    Outcome::Success {
        result: crate::validate::validate_field(&FieldType::from(field_type), value.as_ref(), &rules),
    }
}

/// Validate a step's form data against its field definitions.
/// Returns the field id → message map of failing fields.
#[wasm_bindgen]
pub fn validate_step(fields_json: &str, form_data_json: &str) -> JsValue {
    to_js(&validate_step_inner(fields_json, form_data_json))
}

fn validate_step_inner(fields_json: &str, form_data_json: &str) -> Outcome<StepReport> {
    let fields = parse::parse_fields(fields_json);
    let form_data = parse::parse_form_data(form_data_json);

    match (fields, form_data) {
        (Ok(fields), Ok(form_data)) => Outcome::Success {
            result: crate::validate::validate_step(&fields, &form_data),
        },
        (fields, form_data) => {
            let errors = fields
                .err()
                .into_iter()
                .chain(form_data.err())
                .flatten()
                .map(ErrorDto::from)
                .collect();
            Outcome::Errors { errors }
        }
    }
}

/// Resolve a canvas JSON into the ordered workflow id chain.
#[wasm_bindgen]
pub fn build_workflow_chain(canvas_json: &str) -> JsValue {
    to_js(&build_workflow_chain_inner(canvas_json))
}

fn build_workflow_chain_inner(canvas_json: &str) -> Outcome<Vec<String>> {
    match parse::parse_canvas(canvas_json) {
        Ok(canvas) => Outcome::Success {
            result: crate::chain::build_workflow_chain(&canvas),
        },
        Err(errors) => Outcome::errors(errors),
    }
}

/// Resolve a canvas and flatten the chain into wizard steps.
#[wasm_bindgen]
pub fn plan_workflow_chain(canvas_json: &str, workflows_json: &str) -> JsValue {
    to_js(&plan_workflow_chain_inner(canvas_json, workflows_json))
}

fn plan_workflow_chain_inner(canvas_json: &str, workflows_json: &str) -> Outcome<Vec<PlannedStepDto>> {
    let canvas = match parse::parse_canvas(canvas_json) {
        Ok(c) => c,
        Err(errors) => return Outcome::errors(errors),
    };
    let workflows = match parse::parse_workflows(workflows_json) {
        Ok(w) => w,
        Err(errors) => return Outcome::errors(errors),
    };

    let chain = crate::chain::build_workflow_chain(&canvas);
    match crate::chain::plan_chain(&chain, &workflows) {
        Ok(steps) => Outcome::Success {
            result: steps
                .into_iter()
                .map(|s| PlannedStepDto {
                    position: s.position,
                    workflow_id: s.workflow_id.to_string(),
                    step_id: s.step_id.to_string(),
                    title: s.step.title.clone(),
                })
                .collect(),
        },
        Err(errors) => Outcome::errors(errors),
    }
}

/// Diagnose a canvas. Returns a JSON array of error objects.
#[wasm_bindgen]
pub fn validate_canvas(canvas_json: &str) -> JsValue {
    to_js(&validate_canvas_inner(canvas_json))
}

fn validate_canvas_inner(canvas_json: &str) -> Vec<ErrorDto> {
    let errors = match parse::parse_canvas(canvas_json) {
        Ok(canvas) => crate::validate::validate_canvas(&canvas),
        Err(errors) => errors,
    };
    errors.into_iter().map(ErrorDto::from).collect()
}

/// Lint a workflow definition. Returns a JSON array of error objects.
#[wasm_bindgen]
pub fn validate_workflow_definition(workflow_json: &str) -> JsValue {
    to_js(&validate_workflow_definition_inner(workflow_json))
}

fn validate_workflow_definition_inner(workflow_json: &str) -> Vec<ErrorDto> {
    let errors = match parse::parse_workflow(workflow_json) {
        Ok(workflow) => crate::validate::validate_workflow_definition(&workflow),
        Err(errors) => errors,
    };
    errors.into_iter().map(ErrorDto::from).collect()
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    subject: Option<String>,
}

impl From<DefinitionError> for ErrorDto {
    fn from(e: DefinitionError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            subject: e.subject,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlannedStepDto {
    position: usize,
    workflow_id: String,
    step_id: String,
    title: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Outcome<T> {
    Success { result: T },
    Errors { errors: Vec<ErrorDto> },
}

impl<T> Outcome<T> {
    fn errors(errors: Vec<DefinitionError>) -> Self {
        Outcome::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        }
    }
}
