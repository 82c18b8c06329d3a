//! Connection tree: data model, YAML node parsing and multi-source loading.

mod loader;
mod model;
mod parser;

pub use loader::{LoadReport, LoadReporter, LoadWarning, load, load_with};
pub use model::{ConnectionNode, Forest, Group, Leaf, Leaves, Protocol};
pub use parser::{ParsedDocument, parse_document, parse_node};

/// File name of the primary connection list inside the configuration directory.
pub const PRIMARY_FILE_NAME: &str = "connections.yaml";
