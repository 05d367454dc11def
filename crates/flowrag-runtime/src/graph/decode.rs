//! Boundary decoding of raw node/edge JSON.
//!
//! Raw graphs arrive as loose JSON from the builder UI. This module
//! decodes them into typed values exactly once, accumulating
//! human-readable problem strings instead of failing on the first
//! defect, so the validator can report every structural issue in one
//! pass.

use std::collections::HashSet;
use std::str::FromStr;

use serde_json::Value;

use super::edge::Edge;
use super::node::{Node, NodeConfig, NodeKind};

/// An edge slot from the raw input.
///
/// Malformed entries are carried through so the validator can emit
/// their errors in input order alongside referential checks.
#[derive(Debug, Clone)]
pub(crate) enum EdgeEntry {
    /// A decoded edge; `source`/`target` may still be empty.
    Valid(Edge),
    /// An entry that was not an object at all.
    Malformed(String),
}

/// Decodes raw nodes, or returns every structural error found.
///
/// Structural errors (non-array input, non-object elements, missing
/// `id`/`type`, unknown kinds, undecodable payloads, duplicate ids)
/// abort validation: nothing semantic can be said about nodes that
/// could not be decoded.
pub(crate) fn decode_nodes(value: &Value) -> Result<Vec<Node>, Vec<String>> {
    let Some(entries) = value.as_array() else {
        return Err(vec!["nodes must be an array".to_owned()]);
    };

    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut nodes = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let Some(object) = entry.as_object() else {
            errors.push(format!("node at index {i} must be an object"));
            continue;
        };

        let id = match object.get("id") {
            None => {
                errors.push(format!("node at index {i} is missing 'id'"));
                continue;
            }
            Some(raw) => match raw.as_str() {
                Some(id) => id,
                None => {
                    errors.push(format!("node at index {i} has an invalid 'id'"));
                    continue;
                }
            },
        };

        let kind = match object.get("type") {
            None => {
                errors.push(format!("node at index {i} is missing 'type'"));
                continue;
            }
            Some(raw) => match raw.as_str() {
                Some(kind) => kind,
                None => {
                    errors.push(format!("node at index {i} has an invalid 'type'"));
                    continue;
                }
            },
        };

        if NodeKind::from_str(kind).is_err() {
            errors.push(format!("node at index {i} has unknown type '{kind}'"));
            continue;
        }

        if !seen.insert(id) {
            errors.push(format!("node at index {i} has duplicate id '{id}'"));
            continue;
        }

        // Builder nodes may omit `data` entirely; default it so the
        // adjacently-tagged decode sees an empty payload.
        let data = object
            .get("data")
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        let tagged = serde_json::json!({"type": kind, "data": data});
        let config: NodeConfig = match serde_json::from_value(tagged) {
            Ok(config) => config,
            Err(err) => {
                errors.push(format!("node at index {i} has an invalid '{kind}' payload: {err}"));
                continue;
            }
        };

        let name = object.get("name").and_then(Value::as_str).map(str::to_owned);
        nodes.push(Node {
            id: id.into(),
            name,
            config,
        });
    }

    if errors.is_empty() { Ok(nodes) } else { Err(errors) }
}

/// Decodes raw edges, or returns the one structural error for
/// non-array input.
///
/// Unlike nodes, malformed edge entries do not abort: each becomes an
/// [`EdgeEntry::Malformed`] reported during the referential pass, and
/// missing endpoint fields decode to empty ids for the same pass to
/// flag.
pub(crate) fn decode_edges(value: &Value) -> Result<Vec<EdgeEntry>, String> {
    let Some(entries) = value.as_array() else {
        return Err("edges must be an array".to_owned());
    };

    let edges = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let Some(object) = entry.as_object() else {
                return EdgeEntry::Malformed(format!("edge at index {i} must be an object"));
            };
            let endpoint = |key: &str| {
                object
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned()
            };
            EdgeEntry::Valid(Edge::new(endpoint("source"), endpoint("target")))
        })
        .collect();

    Ok(edges)
}
