//! Canvas chain resolution: linearize connected workflow nodes into the
//! order the onboarding wizard runs them.

use petgraph::visit::{VisitMap, Visitable};

use crate::error::DefinitionError;
use crate::parse::graph::CanvasGraph;
use crate::parse::types::{Canvas, StepDefinition, WorkflowDefinition};

/// Resolve the canvas into an ordered list of workflow ids.
///
/// Starts at the first node (canvas order) with no incoming edge and follows
/// the earliest outgoing edge from each node. Malformed canvases never error:
/// no edges, no start node, a dangling edge or a revisited node all end the
/// walk, so callers must read an empty result as "nothing to execute".
pub fn build_workflow_chain(canvas: &Canvas) -> Vec<String> {
    if canvas.edges.is_empty() {
        tracing::debug!(nodes = canvas.nodes.len(), "canvas has no edges, no chain");
        return Vec::new();
    }

    let graph = CanvasGraph::build(canvas);
    resolve(&graph)
}

/// Walk an already-built canvas graph. See [`build_workflow_chain`].
pub fn resolve(graph: &CanvasGraph) -> Vec<String> {
    if graph.edge_count() == 0 {
        return Vec::new();
    }

    let Some(start) = graph.start_node() else {
        tracing::debug!("every canvas node has an incoming edge, no start node");
        return Vec::new();
    };

    let mut visited = graph.graph.visit_map();
    let mut chain = Vec::new();
    let mut cursor = start;

    loop {
        let Some(workflow_id) = graph.vertex(cursor).workflow_id() else {
            tracing::debug!(
                node = graph.vertex(cursor).id(),
                "edge points at a node that is not on the canvas, chain truncated"
            );
            break;
        };
        if !visited.visit(cursor) {
            tracing::debug!(
                node = graph.vertex(cursor).id(),
                "canvas node revisited, chain truncated at cycle"
            );
            break;
        }
        chain.push(workflow_id.to_string());

        match graph.first_successor(cursor) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    tracing::debug!(length = chain.len(), "resolved workflow chain");
    chain
}

/// One step of a multi-workflow wizard run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStep<'a> {
    /// Zero-based position in the flattened run.
    pub position: usize,
    pub workflow_id: &'a str,
    #[serde(skip)]
    pub step: &'a StepDefinition,
    pub step_id: &'a str,
}

/// Flatten a resolved chain into the steps the wizard walks, in order.
/// Every chain entry without a workflow definition is reported (`W001`).
pub fn plan_chain<'a>(
    chain: &[String],
    workflows: &'a [WorkflowDefinition],
) -> Result<Vec<PlannedStep<'a>>, Vec<DefinitionError>> {
    let mut steps = Vec::new();
    let mut errors = Vec::new();

    for workflow_id in chain {
        let Some(workflow) = workflows.iter().find(|w| &w.id == workflow_id) else {
            errors.push(DefinitionError::chain(
                "W001",
                format!("Chain references unknown workflow '{}'", workflow_id),
                Some(workflow_id.clone()),
            ));
            continue;
        };
        for step in &workflow.steps {
            steps.push(PlannedStep {
                position: steps.len(),
                workflow_id: &workflow.id,
                step,
                step_id: &step.id,
            });
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(steps)
}
