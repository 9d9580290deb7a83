//! Canvas structural validation rules (C001–C008).
//!
//! A canvas resolves cleanly when its connected nodes form one simple path.
//! These rules explain why `build_workflow_chain` returned a short or empty
//! chain; the resolver itself never consults them.

use petgraph::algo::is_cyclic_directed;

use crate::error::DefinitionError;
use crate::parse::graph::CanvasGraph;
use crate::parse::types::Canvas;

/// Run all canvas rules. Returns all errors found.
pub fn validate_canvas(canvas: &Canvas) -> Vec<DefinitionError> {
    let graph = CanvasGraph::build(canvas);
    let mut errors = Vec::new();

    c008_unique_node_ids(&graph, &mut errors);

    // Nothing connected yet is not an error, just no chain.
    if graph.edge_count() == 0 {
        return errors;
    }

    c001_c002_single_start(&graph, &mut errors);
    c003_c004_no_branching(&graph, &mut errors);
    c005_no_cycles(&graph, &mut errors);
    c006_edges_reference_existing_nodes(&graph, &mut errors);
    c007_all_nodes_connected(&graph, &mut errors);

    errors
}

fn c001_c002_single_start(graph: &CanvasGraph, errors: &mut Vec<DefinitionError>) {
    let starts: Vec<&str> = graph
        .placed
        .iter()
        .filter(|&&idx| graph.incoming(idx) == 0 && graph.outgoing(idx) > 0)
        .map(|&idx| graph.vertex(idx).id())
        .collect();

    match starts.as_slice() {
        [] if graph.start_node().is_none() => errors.push(DefinitionError::canvas(
            "C001",
            "Canvas has no start node: every node has an incoming connection",
            None,
        )),
        [] | [_] => {}
        [_, rest @ ..] => {
            for id in rest {
                errors.push(DefinitionError::canvas(
                    "C002",
                    format!(
                        "Canvas has {} start nodes; node '{}' starts a second chain",
                        starts.len(),
                        id
                    ),
                    Some(id.to_string()),
                ));
            }
        }
    }
}

fn c003_c004_no_branching(graph: &CanvasGraph, errors: &mut Vec<DefinitionError>) {
    for &idx in &graph.placed {
        let id = graph.vertex(idx).id();

        let outgoing = graph.outgoing(idx);
        if outgoing > 1 {
            errors.push(DefinitionError::canvas(
                "C003",
                format!(
                    "Node '{}' has {} outgoing connections; a chain allows at most 1",
                    id, outgoing
                ),
                Some(id.to_string()),
            ));
        }

        let incoming = graph.incoming(idx);
        if incoming > 1 {
            errors.push(DefinitionError::canvas(
                "C004",
                format!(
                    "Node '{}' has {} incoming connections; a chain allows at most 1",
                    id, incoming
                ),
                Some(id.to_string()),
            ));
        }
    }
}

fn c005_no_cycles(graph: &CanvasGraph, errors: &mut Vec<DefinitionError>) {
    if is_cyclic_directed(&graph.graph) {
        errors.push(DefinitionError::canvas(
            "C005",
            "Canvas connections contain a cycle",
            None,
        ));
    }
}

fn c006_edges_reference_existing_nodes(graph: &CanvasGraph, errors: &mut Vec<DefinitionError>) {
    for idx in graph.dangling() {
        let id = graph.vertex(idx).id();
        errors.push(DefinitionError::canvas(
            "C006",
            format!("Connection references unknown node '{}'", id),
            Some(id.to_string()),
        ));
    }
}

fn c007_all_nodes_connected(graph: &CanvasGraph, errors: &mut Vec<DefinitionError>) {
    for &idx in &graph.placed {
        if graph.incoming(idx) == 0 && graph.outgoing(idx) == 0 {
            let id = graph.vertex(idx).id();
            errors.push(DefinitionError::canvas(
                "C007",
                format!("Node '{}' is not connected to the chain", id),
                Some(id.to_string()),
            ));
        }
    }
}

fn c008_unique_node_ids(graph: &CanvasGraph, errors: &mut Vec<DefinitionError>) {
    for id in &graph.duplicate_ids {
        errors.push(DefinitionError::canvas(
            "C008",
            format!("Duplicate node id '{}'", id),
            Some(id.clone()),
        ));
    }
}
