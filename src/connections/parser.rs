//! YAML connection list parser
//!
//! Works on generic YAML values rather than typed structs so that one odd
//! entry never rejects the whole file. The only structural decision made
//! here is group versus leaf: a node with a `children` sequence is a group,
//! anything else is a leaf.

use super::model::{ConnectionNode, Group, Leaf, Protocol};
use serde_yml::{Mapping, Value};

const UNNAMED: &str = "unnamed";

/// Outcome of parsing one YAML document.
#[derive(Debug)]
pub enum ParsedDocument {
    /// Nodes from the `connections` sequence plus the number of non-mapping entries skipped.
    Connections { nodes: Vec<ConnectionNode>, skipped: usize },
    /// Valid YAML without a top-level `connections` sequence.
    InvalidShape,
}

/// Parse a whole connection document.
///
/// Returns the YAML error when the text is not valid YAML.
pub fn parse_document(content: &str) -> Result<ParsedDocument, serde_yml::Error> {
    if content.trim().is_empty() {
        return Ok(ParsedDocument::InvalidShape);
    }
    let document: Value = serde_yml::from_str(content)?;

    let Some(entries) = document.get("connections").and_then(Value::as_sequence) else {
        return Ok(ParsedDocument::InvalidShape);
    };

    let mut parser = NodeParser::default();
    let nodes = parser.parse_sequence(entries);
    Ok(ParsedDocument::Connections {
        nodes,
        skipped: parser.skipped,
    })
}

/// Parse a single raw node and everything below it.
pub fn parse_node(raw: &Mapping) -> ConnectionNode {
    NodeParser::default().parse_node(raw)
}

#[derive(Default)]
struct NodeParser {
    skipped: usize,
}

impl NodeParser {
    fn parse_sequence(&mut self, entries: &[Value]) -> Vec<ConnectionNode> {
        let mut nodes = Vec::with_capacity(entries.len());
        for entry in entries {
            match untagged(entry).as_mapping() {
                Some(raw) => nodes.push(self.parse_node(raw)),
                None => self.skipped += 1,
            }
        }
        nodes
    }

    fn parse_node(&mut self, raw: &Mapping) -> ConnectionNode {
        if let Some(children) = raw.get("children").map(untagged).and_then(Value::as_sequence) {
            let name = scalar_field(raw, "name").filter(|name| !name.trim().is_empty());
            return ConnectionNode::Group(Group {
                name: name.unwrap_or_else(|| UNNAMED.to_string()),
                children: self.parse_sequence(children),
            });
        }

        let host = target_field(raw, "host");
        let name = scalar_field(raw, "name")
            .filter(|name| !name.trim().is_empty())
            .or_else(|| host.clone())
            .unwrap_or_else(|| UNNAMED.to_string());

        ConnectionNode::Leaf(Leaf {
            port: port_field(raw),
            protocol: target_field(raw, "protocol").map(|protocol| Protocol::parse(&protocol)),
            description: scalar_field(raw, "description"),
            variables: scalar_field(raw, "variables"),
            host,
            name,
        })
    }
}

fn untagged(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untagged(&tagged.value),
        other => other,
    }
}

fn scalar_field(raw: &Mapping, key: &str) -> Option<String> {
    match untagged(raw.get(key)?) {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Like [`scalar_field`], but blank text is treated as absent.
fn target_field(raw: &Mapping, key: &str) -> Option<String> {
    scalar_field(raw, key).map(|text| text.trim().to_string()).filter(|text| !text.is_empty())
}

/// Port as a number or numeric string; anything else, including 0, is unset.
fn port_field(raw: &Mapping) -> Option<u16> {
    match untagged(raw.get("port")?) {
        Value::Number(number) => number.as_u64().and_then(|port| u16::try_from(port).ok()),
        Value::String(text) => text.trim().parse::<u16>().ok(),
        _ => None,
    }
    .filter(|port| *port != 0)
}

#[cfg(test)]
#[path = "../test/connections/parser.rs"]
mod tests;
