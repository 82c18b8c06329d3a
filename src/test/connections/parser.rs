use super::{ParsedDocument, parse_document, parse_node};
use crate::connections::{ConnectionNode, Protocol};
use serde_yml::{Mapping, Value};

fn mapping(yaml: &str) -> Mapping {
    match serde_yml::from_str::<Value>(yaml).expect("valid yaml") {
        Value::Mapping(mapping) => mapping,
        other => panic!("expected mapping, got {other:?}"),
    }
}

fn nodes(yaml: &str) -> (Vec<ConnectionNode>, usize) {
    match parse_document(yaml).expect("valid yaml") {
        ParsedDocument::Connections { nodes, skipped } => (nodes, skipped),
        ParsedDocument::InvalidShape => panic!("unexpected invalid shape"),
    }
}

#[test]
fn parses_leaf_with_every_field() {
    let raw = mapping(
        r#"
name: TestHost
host: example.com
protocol: ssh
port: 22
description: A test host
variables: -i ~/.ssh/id_ed25519
"#,
    );

    let ConnectionNode::Leaf(leaf) = parse_node(&raw) else {
        panic!("expected a leaf");
    };
    assert_eq!(leaf.name, "TestHost");
    assert_eq!(leaf.host.as_deref(), Some("example.com"));
    assert_eq!(leaf.protocol, Some(Protocol::Ssh));
    assert_eq!(leaf.port, Some(22));
    assert_eq!(leaf.description.as_deref(), Some("A test host"));
    assert_eq!(leaf.variables.as_deref(), Some("-i ~/.ssh/id_ed25519"));
}

#[test]
fn children_sequence_makes_a_group_and_keeps_order() {
    let (nodes, skipped) = nodes(
        r#"
connections:
  - name: Production
    children:
      - name: web
        host: web.prod
        protocol: ssh
      - name: Databases
        children:
          - name: db-b
            host: db-b.prod
            protocol: ssh
          - name: db-a
            host: db-a.prod
            protocol: telnet
  - name: Wiki
    host: https://wiki.example.com
    protocol: web
"#,
    );

    assert_eq!(skipped, 0);
    assert_eq!(nodes.len(), 2);
    let ConnectionNode::Group(production) = &nodes[0] else {
        panic!("expected group");
    };
    let names: Vec<&str> = production.children.iter().map(ConnectionNode::name).collect();
    assert_eq!(names, vec!["web", "Databases"]);
    let nested: Vec<&str> = production.children[1].children().iter().map(ConnectionNode::name).collect();
    assert_eq!(nested, vec!["db-b", "db-a"]);
    assert_eq!(nodes[1].as_leaf().and_then(|leaf| leaf.protocol.clone()), Some(Protocol::Web));
}

#[test]
fn parsing_twice_yields_equal_trees() {
    let yaml = r#"
connections:
  - name: lab
    children:
      - name: switch
        host: 192.168.1.2
        protocol: telnet
        port: 2323
"#;
    assert_eq!(nodes(yaml), nodes(yaml));
}

#[test]
fn leaf_without_target_fields_is_kept_but_not_actionable() {
    let raw = mapping("name: placeholder\ndescription: fill me in");
    let node = parse_node(&raw);
    let leaf = node.as_leaf().expect("leaf");
    assert_eq!(leaf.host, None);
    assert_eq!(leaf.protocol, None);
    assert!(!leaf.is_actionable());
}

#[test]
fn blank_host_and_protocol_parse_as_missing() {
    let blank_host = mapping("name: blank\nhost: \"\"\nprotocol: ssh");
    let node = parse_node(&blank_host);
    let leaf = node.as_leaf().expect("leaf");
    assert_eq!(leaf.host, None);
    assert!(!leaf.is_actionable());

    let blank_protocol = mapping("name: noproto\nhost: rm-everything\nprotocol: \"  \"");
    let node = parse_node(&blank_protocol);
    let leaf = node.as_leaf().expect("leaf");
    assert_eq!(leaf.protocol, None);
    assert!(!leaf.is_actionable());
}

#[test]
fn non_sequence_children_is_treated_as_leaf() {
    let raw = mapping("name: odd\nchildren: nope\nhost: odd.example\nprotocol: ssh");
    assert!(parse_node(&raw).as_leaf().is_some());
}

#[test]
fn scalars_are_stringified_and_ports_coerced() {
    let raw = mapping("name: 42\nhost: 10\nprotocol: ssh\nport: \"2222\"\nvariables: true");
    let node = parse_node(&raw);
    let leaf = node.as_leaf().expect("leaf");
    assert_eq!(leaf.name, "42");
    assert_eq!(leaf.host.as_deref(), Some("10"));
    assert_eq!(leaf.port, Some(2222));
    assert_eq!(leaf.variables.as_deref(), Some("true"));
}

#[test]
fn out_of_range_port_is_dropped() {
    let raw = mapping("name: big\nhost: big.example\nprotocol: ssh\nport: 70000");
    assert_eq!(parse_node(&raw).as_leaf().and_then(|leaf| leaf.port), None);
}

#[test]
fn zero_port_is_unset() {
    let raw = mapping("name: zero\nhost: zero.example\nprotocol: telnet\nport: 0");
    let node = parse_node(&raw);
    let leaf = node.as_leaf().expect("leaf");
    assert_eq!(leaf.port, None);
    assert_eq!(leaf.effective_port(), Some(23));
}

#[test]
fn missing_name_falls_back_to_host_then_unnamed() {
    let with_host = mapping("host: fallback.example\nprotocol: ssh");
    assert_eq!(parse_node(&with_host).name(), "fallback.example");

    let bare = mapping("protocol: ssh\nname: \"  \"");
    assert_eq!(parse_node(&bare).name(), "unnamed");
}

#[test]
fn non_mapping_entries_are_skipped_and_counted() {
    let (nodes, skipped) = nodes(
        r#"
connections:
  - just-a-string
  - name: real
    host: real.example
    protocol: ssh
  - name: group
    children:
      - 17
"#,
    );
    assert_eq!(nodes.len(), 2);
    assert_eq!(skipped, 2);
    assert!(nodes[1].children().is_empty());
}

#[test]
fn document_without_connections_list_is_invalid_shape() {
    assert!(matches!(parse_document("hosts: []").expect("valid yaml"), ParsedDocument::InvalidShape));
    assert!(matches!(parse_document("connections: foo").expect("valid yaml"), ParsedDocument::InvalidShape));
    assert!(matches!(parse_document("").expect("empty yaml is null"), ParsedDocument::InvalidShape));
}

#[test]
fn malformed_yaml_is_an_error() {
    assert!(parse_document("connections: [unclosed").is_err());
}
