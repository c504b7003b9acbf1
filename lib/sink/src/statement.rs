//! Gremlin statement rendering for the single-statement submission path.
//!
//! Vertices become `g.addV(...)` traversals and edges become
//! `g.V(...).addE(...).to(g.V(...))` with both endpoints pinned to their
//! partition, which lets the store resolve cross-partition edges.

use graphload_core::{GraphEdge, GraphElement, GraphVertex, PropertyValue};
use std::borrow::Cow;
use std::fmt::Write;

/// Quote a string literal for Gremlin (single quotes, backslash escapes).
pub fn quote(s: &str) -> String {
    let escaped: Cow<'_, str> = if s.contains(['\\', '\'', '\n', '\r', '\t']) {
        let mut out = String::with_capacity(s.len() + 8);
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c => out.push(c),
            }
        }
        Cow::Owned(out)
    } else {
        Cow::Borrowed(s)
    };
    format!("'{}'", escaped)
}

/// Literal form of a property value: strings quoted, numbers bare.
pub fn literal(value: &PropertyValue) -> String {
    match value {
        PropertyValue::String(s) => quote(s),
        PropertyValue::Float(x) if !x.is_finite() => quote(&x.to_string()),
        PropertyValue::Float(x) => format!("{:?}", x),
        PropertyValue::Integer(i) => i.to_string(),
        // Gremlin-Groovy needs the suffix to keep epoch millis out of int range.
        PropertyValue::Timestamp(t) => format!("{}L", t),
    }
}

pub fn vertex_statement(vertex: &GraphVertex) -> String {
    let mut statement = format!(
        "g.addV({}).property('id', {})",
        quote(&vertex.label),
        quote(&vertex.id)
    );
    for (key, value) in &vertex.properties {
        let _ = write!(statement, ".property({}, {})", quote(key), literal(value));
    }
    statement
}

/// Edge statement. Property names used for partition lookup must match the
/// vertex property holding the partition key.
pub fn edge_statement(edge: &GraphEdge, partition_property: &str) -> String {
    let mut statement = format!(
        "g.V({}).has({}, {}).addE({}).to(g.V({}).has({}, {})).property('id', {})",
        quote(&edge.source_id),
        quote(partition_property),
        quote(&edge.source_partition_key),
        quote(&edge.label),
        quote(&edge.destination_id),
        quote(partition_property),
        quote(&edge.destination_partition_key),
        quote(&edge.id),
    );
    for (key, value) in &edge.properties {
        let _ = write!(statement, ".property({}, {})", quote(key), literal(value));
    }
    statement
}

pub fn element_statement(element: &GraphElement, partition_property: &str) -> String {
    match element {
        GraphElement::Vertex(v) => vertex_statement(v),
        GraphElement::Edge(e) => edge_statement(e, partition_property),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphload_core::{ElementFactory, PartitionStrategy};

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote("a\\b"), r"'a\\b'");
        assert_eq!(quote("x\ny"), r"'x\ny'");
    }

    #[test]
    fn test_literals_keep_numeric_distinction() {
        assert_eq!(literal(&PropertyValue::from("3")), "'3'");
        assert_eq!(literal(&PropertyValue::from(3i64)), "3");
        assert_eq!(literal(&PropertyValue::from(1.5)), "1.5");
        assert_eq!(literal(&PropertyValue::from(2.0)), "2.0");
        assert_eq!(literal(&PropertyValue::Timestamp(1_700_000_000_000)), "1700000000000L");
    }

    #[test]
    fn test_vertex_statement() {
        let v = GraphVertex::new("1-0".into(), "node".into(), "1-0".into())
            .with_property("level", 2u32)
            .with_property("name", "1-0")
            .with_property("partitionId", "1-0");
        assert_eq!(
            vertex_statement(&v),
            "g.addV('node').property('id', '1-0').property('level', 2)\
             .property('name', '1-0').property('partitionId', '1-0')"
        );
    }

    #[test]
    fn test_edge_statement() {
        let factory = ElementFactory::new(4, PartitionStrategy::PathPrefix, "partitionId");
        let e = factory.make_edge("child", "1-0", "1-0-2", None);
        assert_eq!(
            edge_statement(&e, "partitionId"),
            "g.V('1-0').has('partitionId', '1-0').addE('child')\
             .to(g.V('1-0-2').has('partitionId', '1-0')).property('id', '1-0 -> 1-0-2')\
             .property('model', 'primary')"
        );
    }
}
