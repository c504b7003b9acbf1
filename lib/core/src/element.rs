// Graph elements handed to a bulk sink - vertices and edges addressed by string ids
use crate::PropertyValue;
use serde::Serialize;
use std::collections::BTreeMap;

pub type Properties = BTreeMap<String, PropertyValue>;

pub const LABEL_NODE: &str = "node";
pub const LABEL_ASSET: &str = "asset";
pub const LABEL_CHILD: &str = "child";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphVertex {
    pub id: String,
    pub label: String,
    pub partition_key: String,
    pub properties: Properties,
}

/// A directed edge. Endpoints are referenced by id only; the store resolves them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub label: String,
    pub source_id: String,
    pub destination_id: String,
    pub source_label: String,
    pub destination_label: String,
    pub source_partition_key: String,
    pub destination_partition_key: String,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphElement {
    Vertex(GraphVertex),
    Edge(GraphEdge),
}

impl GraphVertex {
    #[inline]
    #[must_use]
    pub fn new(id: String, label: String, partition_key: String) -> Self {
        Self {
            id,
            label,
            partition_key,
            properties: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[inline]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

impl GraphEdge {
    #[inline]
    #[must_use]
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[inline]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

impl GraphElement {
    #[inline]
    pub fn id(&self) -> &str {
        match self {
            GraphElement::Vertex(v) => &v.id,
            GraphElement::Edge(e) => &e.id,
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        match self {
            GraphElement::Vertex(v) => &v.label,
            GraphElement::Edge(e) => &e.label,
        }
    }

    #[inline]
    pub fn is_vertex(&self) -> bool {
        matches!(self, GraphElement::Vertex(_))
    }

    #[inline]
    pub fn as_vertex(&self) -> Option<&GraphVertex> {
        match self {
            GraphElement::Vertex(v) => Some(v),
            GraphElement::Edge(_) => None,
        }
    }

    #[inline]
    pub fn as_edge(&self) -> Option<&GraphEdge> {
        match self {
            GraphElement::Edge(e) => Some(e),
            GraphElement::Vertex(_) => None,
        }
    }
}

impl From<GraphVertex> for GraphElement {
    fn from(v: GraphVertex) -> Self {
        GraphElement::Vertex(v)
    }
}

impl From<GraphEdge> for GraphElement {
    fn from(e: GraphEdge) -> Self {
        GraphElement::Edge(e)
    }
}
