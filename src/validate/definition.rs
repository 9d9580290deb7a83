//! Authoring-time lint for field, step and workflow definitions (D001–D007).
//!
//! The runtime validator tolerates every one of these mistakes; this pass
//! exists so the form builder can surface them before anyone fills a form.

use std::collections::HashSet;

use fancy_regex::Regex;

use crate::error::DefinitionError;
use crate::parse::types::{FieldDefinition, FieldType, StepDefinition, WorkflowDefinition};

/// Lint a workflow and all of its steps. Returns all errors found.
pub fn validate_workflow_definition(workflow: &WorkflowDefinition) -> Vec<DefinitionError> {
    let mut errors = Vec::new();

    if workflow.steps.is_empty() {
        errors.push(DefinitionError::definition(
            "D007",
            format!("Workflow '{}' has no steps", workflow.id),
            Some(workflow.id.clone()),
        ));
    }

    let mut seen = HashSet::new();
    for step in &workflow.steps {
        if !seen.insert(step.id.as_str()) {
            errors.push(DefinitionError::definition(
                "D006",
                format!("Duplicate step id '{}' in workflow '{}'", step.id, workflow.id),
                Some(step.id.clone()),
            ));
        }
        errors.extend(validate_step_definition(step));
    }

    errors
}

/// Lint one step's field definitions. Returns all errors found.
pub fn validate_step_definition(step: &StepDefinition) -> Vec<DefinitionError> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for field in &step.fields {
        if !seen.insert(field.id.as_str()) {
            errors.push(DefinitionError::definition(
                "D001",
                format!("Duplicate field id '{}' in step '{}'", field.id, step.id),
                Some(field.id.clone()),
            ));
        }
        validate_field_definition(field, &mut errors);
    }

    errors
}

fn validate_field_definition(field: &FieldDefinition, errors: &mut Vec<DefinitionError>) {
    let rules = field.effective_rules();
    let subject = Some(field.id.clone());

    if let Some(pattern) = &rules.pattern {
        if let Err(e) = Regex::new(pattern) {
            errors.push(DefinitionError::definition(
                "D002",
                format!("Invalid validation pattern '{}': {}", pattern, e),
                subject.clone(),
            ));
        }
    }

    if let (Some(min), Some(max)) = (rules.min, rules.max) {
        if min > max {
            errors.push(DefinitionError::definition(
                "D003",
                format!("Minimum value {} is greater than maximum value {}", min, max),
                subject.clone(),
            ));
        }
    }

    if let (Some(min), Some(max)) = (rules.min_length, rules.max_length) {
        if min > max {
            errors.push(DefinitionError::definition(
                "D004",
                format!("Minimum length {} is greater than maximum length {}", min, max),
                subject.clone(),
            ));
        }
    }

    if field.field_type == FieldType::Select
        && rules.options.as_ref().is_none_or(|o| o.is_empty())
    {
        errors.push(DefinitionError::definition(
            "D005",
            "Select field must declare at least one option",
            subject,
        ));
    }
}
