//! Parse phase: JSON → Rust types + canvas graph construction.

pub mod graph;
pub mod types;

pub use graph::CanvasGraph;
pub use types::*;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DefinitionError;

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, Vec<DefinitionError>> {
    serde_json::from_str::<T>(json).map_err(|e| {
        vec![DefinitionError::parse(
            "P001",
            format!("Failed to parse {} JSON: {}", what, e),
        )]
    })
}

/// Deserialize a JSON array of field definitions.
pub fn parse_fields(json: &str) -> Result<Vec<FieldDefinition>, Vec<DefinitionError>> {
    parse_json(json, "field definitions")
}

/// Deserialize a form-data JSON object (field id → value).
pub fn parse_form_data(json: &str) -> Result<Map<String, Value>, Vec<DefinitionError>> {
    parse_json(json, "form data")
}

/// Deserialize a workflow definition JSON string.
pub fn parse_workflow(json: &str) -> Result<WorkflowDefinition, Vec<DefinitionError>> {
    parse_json(json, "workflow")
}

/// Deserialize a JSON array of workflow definitions.
pub fn parse_workflows(json: &str) -> Result<Vec<WorkflowDefinition>, Vec<DefinitionError>> {
    parse_json(json, "workflows")
}

/// Deserialize a canvas (nodes + edges) JSON string.
pub fn parse_canvas(json: &str) -> Result<Canvas, Vec<DefinitionError>> {
    parse_json(json, "canvas")
}

/// Parse canvas JSON and build its graph in one step.
pub fn parse_and_build(json: &str) -> Result<(Canvas, CanvasGraph), Vec<DefinitionError>> {
    let canvas = parse_canvas(json)?;
    let graph = CanvasGraph::build(&canvas);
    Ok((canvas, graph))
}
