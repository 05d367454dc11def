//! Workflow graph validation.
//!
//! [`validate_graph`] is the raw boundary: it takes the builder's
//! node/edge JSON, decodes it once, and returns a
//! [`ValidationReport`]. It never returns an error; every problem is
//! a report entry. [`validate_definition`] runs the same semantic
//! rules on an already-typed [`WorkflowDefinition`].
//!
//! Rules run in a fixed order and accumulate (no short-circuiting
//! once the input decodes), so repeated calls on identical input
//! produce byte-identical reports:
//!
//! 1. cardinality — exactly one `userQuery`, at least one `llmEngine`
//!    and one `output`;
//! 2. edge referential integrity — missing or unknown endpoints;
//! 3. isolated nodes;
//! 4. type position — `userQuery` sources only, `output` sinks only;
//! 5. configuration warnings (non-fatal);
//! 6. cycle detection via Kahn-style topological consumption.

mod report;

use std::collections::{HashMap, VecDeque};

use serde_json::Value;

use crate::TRACING_TARGET;
use crate::graph::decode::{self, EdgeEntry};
use crate::graph::{Node, NodeConfig, NodeKind, WorkflowDefinition};

pub use report::ValidationReport;

/// Validates a raw node/edge graph as submitted by the builder.
///
/// Structurally fatal input (non-array nodes/edges, nodes without
/// `id`/`type`, unknown kinds, duplicate ids) aborts with only the
/// structural errors; otherwise all semantic rules run.
pub fn validate_graph(nodes: &Value, edges: &Value) -> ValidationReport {
    let nodes = match decode::decode_nodes(nodes) {
        Ok(nodes) => nodes,
        Err(errors) => return ValidationReport::structural(errors),
    };
    let edges = match decode::decode_edges(edges) {
        Ok(edges) => edges,
        Err(error) => return ValidationReport::structural(vec![error]),
    };

    let report = semantic(&nodes, &edges);
    tracing::debug!(
        target: TRACING_TARGET,
        valid = report.valid,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated workflow graph"
    );
    report
}

/// Validates the semantic rules of a typed definition.
pub fn validate_definition(definition: &WorkflowDefinition) -> ValidationReport {
    let edges: Vec<EdgeEntry> = definition
        .edges
        .iter()
        .cloned()
        .map(EdgeEntry::Valid)
        .collect();
    semantic(&definition.nodes, &edges)
}

fn semantic(nodes: &[Node], edges: &[EdgeEntry]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Index-addressed arena: nodes become integer handles, adjacency
    // and in-degree live in flat vectors.
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if index.insert(node.id.as_str(), i).is_some() {
            errors.push(format!("duplicate node id '{}'", node.id));
        }
    }
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut in_degree: Vec<usize> = vec![0; nodes.len()];

    // Rule 1: cardinality.
    let count = |kind: NodeKind| nodes.iter().filter(|n| n.kind() == kind).count();
    if count(NodeKind::UserQuery) != 1 {
        errors.push("exactly one userQuery node is required".to_owned());
    }
    if count(NodeKind::LlmEngine) < 1 {
        errors.push("at least one llmEngine node is required".to_owned());
    }
    if count(NodeKind::Output) < 1 {
        errors.push("at least one output node is required".to_owned());
    }

    // Rule 2: edge referential integrity. Offending edges are
    // reported and left out of the adjacency structure.
    for (i, entry) in edges.iter().enumerate() {
        let edge = match entry {
            EdgeEntry::Valid(edge) => edge,
            EdgeEntry::Malformed(message) => {
                errors.push(message.clone());
                continue;
            }
        };
        if edge.source.is_empty() {
            errors.push(format!("edge at index {i} is missing 'source'"));
            continue;
        }
        if edge.target.is_empty() {
            errors.push(format!("edge at index {i} is missing 'target'"));
            continue;
        }
        let Some(&source) = index.get(edge.source.as_str()) else {
            errors.push(format!("edge source '{}' does not exist", edge.source));
            continue;
        };
        let Some(&target) = index.get(edge.target.as_str()) else {
            errors.push(format!("edge target '{}' does not exist", edge.target));
            continue;
        };
        outgoing[source].push(target);
        in_degree[target] += 1;
    }

    // Rule 3: isolated nodes are unreachable components.
    for (i, node) in nodes.iter().enumerate() {
        if outgoing[i].is_empty() && in_degree[i] == 0 {
            errors.push(format!(
                "node '{}' is isolated (no incoming or outgoing edges)",
                node.id
            ));
        }
    }

    // Rule 4: type position.
    for (i, node) in nodes.iter().enumerate() {
        match node.kind() {
            NodeKind::UserQuery if in_degree[i] > 0 => {
                errors.push(format!(
                    "userQuery node '{}' cannot have incoming edges",
                    node.id
                ));
            }
            NodeKind::Output if !outgoing[i].is_empty() => {
                errors.push(format!(
                    "output node '{}' cannot have outgoing edges",
                    node.id
                ));
            }
            _ => {}
        }
    }

    // Rule 5: configuration warnings, never fatal.
    for node in nodes {
        match &node.config {
            NodeConfig::KnowledgeBase(config) if !config.has_documents() => {
                warnings.push(format!(
                    "knowledgeBase node '{}' has no documents uploaded",
                    node.id
                ));
            }
            NodeConfig::LlmEngine(config) => {
                if !config.has_api_key() {
                    warnings.push(format!("llmEngine node '{}' is missing an API key", node.id));
                }
                if !config.has_model() {
                    warnings.push(format!("llmEngine node '{}' has no model selected", node.id));
                }
            }
            _ => {}
        }
    }

    // Rule 6: cycle detection. Kahn-style consumption: repeatedly
    // dequeue zero-in-degree handles; consuming fewer handles than
    // nodes means a cycle remains.
    let mut remaining = in_degree;
    let mut queue: VecDeque<usize> = remaining
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(i, _)| i)
        .collect();
    let mut consumed = 0;
    while let Some(handle) = queue.pop_front() {
        consumed += 1;
        for &next in &outgoing[handle] {
            remaining[next] -= 1;
            if remaining[next] == 0 {
                queue.push_back(next);
            }
        }
    }
    if consumed < nodes.len() {
        errors.push("workflow contains a cycle".to_owned());
    }

    ValidationReport::from_parts(errors, warnings)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::graph::{Edge, KnowledgeBaseConfig, LlmConfig, OutputConfig, QueryConfig};

    fn query(id: &str) -> Node {
        Node::new(id, QueryConfig::default())
    }

    fn llm(id: &str) -> Node {
        Node::new(
            id,
            LlmConfig {
                model: Some("gemini-2.0-flash".into()),
                api_key: Some("key".into()),
                ..Default::default()
            },
        )
    }

    fn output(id: &str) -> Node {
        Node::new(id, OutputConfig::default())
    }

    fn linear_pipeline() -> WorkflowDefinition {
        WorkflowDefinition::new(
            vec![query("q1"), llm("llm1"), output("out1")],
            vec![Edge::new("q1", "llm1"), Edge::new("llm1", "out1")],
        )
    }

    #[test]
    fn linear_pipeline_is_valid() {
        let report = linear_pipeline().validate();
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn validation_is_deterministic() {
        let nodes = json!([
            {"id": "q1", "type": "userQuery"},
            {"id": "llm1", "type": "llmEngine", "data": {}},
            {"id": "kb1", "type": "knowledgeBase", "data": {}},
        ]);
        let edges = json!([
            {"id": "e1", "source": "q1", "target": "llm1"},
            {"source": "llm1", "target": "ghost"},
        ]);

        let first = validate_graph(&nodes, &edges);
        let second = validate_graph(&nodes, &edges);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn missing_user_query_is_reported() {
        let definition = WorkflowDefinition::new(
            vec![llm("llm1"), output("out1")],
            vec![Edge::new("llm1", "out1")],
        );
        let report = definition.validate();
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("userQuery")));
    }

    #[test]
    fn duplicated_user_query_is_the_same_class_of_error() {
        let definition = WorkflowDefinition::new(
            vec![query("q1"), query("q2"), llm("llm1"), output("out1")],
            vec![
                Edge::new("q1", "llm1"),
                Edge::new("q2", "llm1"),
                Edge::new("llm1", "out1"),
            ],
        );
        let report = definition.validate();
        assert!(!report.valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e == "exactly one userQuery node is required")
        );
    }

    #[test]
    fn output_with_outgoing_edge_is_reported() {
        let definition = WorkflowDefinition::new(
            vec![query("query1"), llm("llm1"), output("output1")],
            vec![
                Edge::new("query1", "llm1"),
                Edge::new("llm1", "output1"),
                Edge::new("output1", "query1"),
            ],
        );
        let report = definition.validate();
        assert!(
            report
                .errors
                .iter()
                .any(|e| e == "output node 'output1' cannot have outgoing edges")
        );
        // The same backward edge also violates the userQuery rule.
        assert!(
            report
                .errors
                .iter()
                .any(|e| e == "userQuery node 'query1' cannot have incoming edges")
        );
    }

    #[test]
    fn three_node_cycle_is_flagged() {
        let definition = WorkflowDefinition::new(
            vec![query("a"), llm("b"), output("c")],
            vec![Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("c", "a")],
        );
        let report = definition.validate();
        assert!(report.errors.iter().any(|e| e == "workflow contains a cycle"));
    }

    #[test]
    fn isolated_node_is_flagged_even_when_cardinality_holds() {
        let mut definition = linear_pipeline();
        definition.nodes.push(llm("stray"));
        let report = definition.validate();
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec!["node 'stray' is isolated (no incoming or outgoing edges)".to_owned()]
        );
    }

    #[test]
    fn unknown_edge_endpoints_are_reported_and_skipped() {
        let mut definition = linear_pipeline();
        definition.edges.push(Edge::new("llm1", "ghost"));
        definition.edges.push(Edge::new("phantom", "out1"));
        let report = definition.validate();
        assert!(
            report
                .errors
                .iter()
                .any(|e| e == "edge target 'ghost' does not exist")
        );
        assert!(
            report
                .errors
                .iter()
                .any(|e| e == "edge source 'phantom' does not exist")
        );
        // Skipped edges must not poison the cycle check.
        assert!(!report.errors.iter().any(|e| e.contains("cycle")));
    }

    #[test]
    fn empty_edge_endpoints_are_reported() {
        let mut definition = linear_pipeline();
        definition.edges.push(Edge::new("", "out1"));
        definition.edges.push(Edge::new("llm1", ""));
        let report = definition.validate();
        assert!(
            report
                .errors
                .iter()
                .any(|e| e == "edge at index 2 is missing 'source'")
        );
        assert!(
            report
                .errors
                .iter()
                .any(|e| e == "edge at index 3 is missing 'target'")
        );
    }

    #[test]
    fn configuration_problems_are_warnings_not_errors() {
        let definition = WorkflowDefinition::new(
            vec![
                query("q1"),
                Node::new("kb1", KnowledgeBaseConfig::default()),
                Node::new("llm1", LlmConfig::default()),
                output("out1"),
            ],
            vec![
                Edge::new("q1", "kb1"),
                Edge::new("kb1", "llm1"),
                Edge::new("llm1", "out1"),
            ],
        );
        let report = definition.validate();
        assert!(report.valid);
        assert_eq!(
            report.warnings,
            vec![
                "knowledgeBase node 'kb1' has no documents uploaded".to_owned(),
                "llmEngine node 'llm1' is missing an API key".to_owned(),
                "llmEngine node 'llm1' has no model selected".to_owned(),
            ]
        );
    }

    #[test]
    fn non_array_nodes_abort_with_structural_error() {
        let report = validate_graph(&json!({"not": "a list"}), &json!([]));
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["nodes must be an array".to_owned()]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn non_array_edges_abort_with_structural_error() {
        let report = validate_graph(&json!([]), &json!("nope"));
        assert_eq!(report.errors, vec!["edges must be an array".to_owned()]);
    }

    #[test]
    fn nodes_missing_id_or_type_abort_with_only_structural_errors() {
        let nodes = json!([
            {"type": "userQuery"},
            {"id": "llm1"},
            42,
        ]);
        let report = validate_graph(&nodes, &json!([]));
        assert_eq!(
            report.errors,
            vec![
                "node at index 0 is missing 'id'".to_owned(),
                "node at index 1 is missing 'type'".to_owned(),
                "node at index 2 must be an object".to_owned(),
            ]
        );
        // Semantic rules (cardinality would fire here) must not run.
        assert!(!report.errors.iter().any(|e| e.contains("required")));
    }

    #[test]
    fn unknown_node_type_is_a_structural_error() {
        let nodes = json!([{"id": "w1", "type": "webSearch"}]);
        let report = validate_graph(&nodes, &json!([]));
        assert_eq!(
            report.errors,
            vec!["node at index 0 has unknown type 'webSearch'".to_owned()]
        );
    }

    #[test]
    fn duplicate_node_ids_are_a_structural_error() {
        let nodes = json!([
            {"id": "n1", "type": "userQuery"},
            {"id": "n1", "type": "llmEngine"},
        ]);
        let report = validate_graph(&nodes, &json!([]));
        assert_eq!(
            report.errors,
            vec!["node at index 1 has duplicate id 'n1'".to_owned()]
        );
    }

    #[test]
    fn malformed_edge_entries_are_reported_in_input_order() {
        let nodes = json!([
            {"id": "q1", "type": "userQuery"},
            {"id": "llm1", "type": "llmEngine"},
            {"id": "out1", "type": "output"},
        ]);
        let edges = json!([
            {"source": "q1", "target": "llm1"},
            "not an edge",
            {"source": "llm1", "target": "out1"},
        ]);
        let report = validate_graph(&nodes, &edges);
        assert_eq!(
            report.errors,
            vec!["edge at index 1 must be an object".to_owned()]
        );
    }

    #[test]
    fn raw_and_typed_validation_agree() {
        let nodes = json!([
            {"id": "q1", "type": "userQuery", "data": {}},
            {"id": "llm1", "type": "llmEngine", "data": {"model": "m", "api_key": "k"}},
            {"id": "out1", "type": "output", "data": {}},
        ]);
        let edges = json!([
            {"source": "q1", "target": "llm1"},
            {"source": "llm1", "target": "out1"},
        ]);
        let raw = validate_graph(&nodes, &edges);
        let typed = linear_pipeline().validate();
        assert_eq!(raw, typed);
    }
}
