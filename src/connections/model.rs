//! Connection tree domain models.

use serde::{Serialize, Serializer};
use std::fmt;

/// Protocol of a leaf target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Protocol {
    Ssh,
    Telnet,
    Web,
    /// Any other protocol name; used verbatim as the program in the generic template.
    Other(String),
}

impl Protocol {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ssh" => Protocol::Ssh,
            "telnet" => Protocol::Telnet,
            "web" => Protocol::Web,
            other => Protocol::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Protocol::Ssh => "ssh",
            Protocol::Telnet => "telnet",
            Protocol::Web => "web",
            Protocol::Other(name) => name,
        }
    }

    /// Well-known port, if the protocol has one.
    pub fn standard_port(&self) -> Option<u16> {
        match self {
            Protocol::Ssh => Some(22),
            Protocol::Telnet => Some(23),
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Protocol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single connection target.
///
/// Every target field is optional: a leaf missing `host` or `protocol` still
/// shows up in the tree but cannot be launched. Blank values count as missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,
}

impl Leaf {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: None,
            protocol: None,
            port: None,
            description: None,
            variables: None,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.target_host().is_some() && self.target_protocol().is_some()
    }

    /// Host with surrounding whitespace removed, if it is not blank.
    pub fn target_host(&self) -> Option<&str> {
        self.host.as_deref().map(str::trim).filter(|host| !host.is_empty())
    }

    pub fn target_protocol(&self) -> Option<&Protocol> {
        self.protocol.as_ref().filter(|protocol| !protocol.as_str().trim().is_empty())
    }

    /// Stored port, falling back to the protocol's standard port. Port 0 counts as unset.
    pub fn effective_port(&self) -> Option<u16> {
        self.port
            .filter(|port| *port != 0)
            .or_else(|| self.target_protocol().and_then(Protocol::standard_port))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub name: String,
    pub children: Vec<ConnectionNode>,
}

/// A node of the connection tree: either a group of nodes or a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConnectionNode {
    Group(Group),
    Leaf(Leaf),
}

impl ConnectionNode {
    pub fn name(&self) -> &str {
        match self {
            ConnectionNode::Group(group) => &group.name,
            ConnectionNode::Leaf(leaf) => &leaf.name,
        }
    }

    pub fn children(&self) -> &[ConnectionNode] {
        match self {
            ConnectionNode::Group(group) => &group.children,
            ConnectionNode::Leaf(_) => &[],
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            ConnectionNode::Leaf(leaf) => Some(leaf),
            ConnectionNode::Group(_) => None,
        }
    }
}

/// Ordered top-level nodes from every loaded source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<ConnectionNode>,
}

impl Forest {
    pub fn new(roots: Vec<ConnectionNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[ConnectionNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first, pre-order walk over every leaf.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![self.roots.iter()],
        }
    }
}

/// Iterator returned by [`Forest::leaves`].
pub struct Leaves<'a> {
    stack: Vec<std::slice::Iter<'a, ConnectionNode>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Leaf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(ConnectionNode::Leaf(leaf)) => return Some(leaf),
                Some(ConnectionNode::Group(group)) => self.stack.push(group.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../test/connections/model.rs"]
mod tests;
