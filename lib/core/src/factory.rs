use crate::element::{LABEL_ASSET, LABEL_NODE};
use crate::{id, AttributeProvider, GenerationConfig, GraphEdge, GraphVertex, PartitionStrategy};
use std::collections::BTreeMap;

/// Words in the free-text `comments` of an asset.
pub const COMMENT_WORDS: usize = 30;

/// Builds vertices and edges with the run's labelling and partitioning rules.
#[derive(Debug, Clone)]
pub struct ElementFactory {
    asset_threshold: u32,
    partition: PartitionStrategy,
    partition_property: String,
}

impl ElementFactory {
    pub fn new(
        asset_threshold: u32,
        partition: PartitionStrategy,
        partition_property: impl Into<String>,
    ) -> Self {
        Self {
            asset_threshold,
            partition,
            partition_property: partition_property.into(),
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.asset_threshold, config.partition, config.partition_property.clone())
    }

    #[inline]
    pub fn label_for_level(&self, level: u32) -> &'static str {
        if level >= self.asset_threshold {
            LABEL_ASSET
        } else {
            LABEL_NODE
        }
    }

    #[inline]
    pub fn partition_key(&self, id: &str) -> String {
        self.partition.key_for(id)
    }

    pub fn make_vertex<A: AttributeProvider + ?Sized>(
        &self,
        id: &str,
        level: u32,
        parent_id: &str,
        attributes: &mut A,
    ) -> GraphVertex {
        let label = self.label_for_level(level);
        let partition_key = self.partition_key(id);

        let mut vertex = GraphVertex::new(id.to_string(), label.to_string(), partition_key.clone());
        if label == LABEL_ASSET {
            vertex = vertex
                .with_property("manufacturer", attributes.random_manufacturer())
                .with_property(
                    "installedAt",
                    crate::PropertyValue::Timestamp(attributes.random_timestamp()),
                )
                .with_property("serial", attributes.random_identifier())
                .with_property("comments", attributes.random_sentence(COMMENT_WORDS));
        }

        vertex
            .with_property(self.partition_property.as_str(), partition_key)
            .with_property("level", level)
            .with_property(
                "createdAt",
                crate::PropertyValue::Timestamp(chrono::Utc::now().timestamp_millis()),
            )
            .with_property("name", id)
            .with_property("parentId", parent_id)
    }

    /// Edge id is `"<source> -> <destination><suffix>"`.
    pub fn make_edge(
        &self,
        label: &str,
        source_id: &str,
        destination_id: &str,
        suffix: Option<&str>,
    ) -> GraphEdge {
        let mut properties = BTreeMap::new();
        properties.insert("model".to_string(), "primary".into());

        GraphEdge {
            id: format!("{} -> {}{}", source_id, destination_id, suffix.unwrap_or("")),
            label: label.to_string(),
            source_id: source_id.to_string(),
            destination_id: destination_id.to_string(),
            source_label: self.label_for_level(id::level_of(source_id)).to_string(),
            destination_label: self.label_for_level(id::level_of(destination_id)).to_string(),
            source_partition_key: self.partition_key(source_id),
            destination_partition_key: self.partition_key(destination_id),
            properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FakeAttributes, PropertyValue};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn factory() -> ElementFactory {
        ElementFactory::new(4, PartitionStrategy::PathPrefix, "partitionId")
    }

    #[test]
    fn test_root_vertex_properties() {
        let mut attrs = FakeAttributes::new(StdRng::seed_from_u64(1));
        let v = factory().make_vertex("1", 1, "", &mut attrs);

        assert_eq!(v.label, "node");
        assert_eq!(v.partition_key, "1");
        assert_eq!(v.property("partitionId"), Some(&PropertyValue::from("1")));
        assert_eq!(v.property("level"), Some(&PropertyValue::Integer(1)));
        assert_eq!(v.property("name"), Some(&PropertyValue::from("1")));
        assert_eq!(v.property("parentId"), Some(&PropertyValue::from("")));
        assert!(matches!(v.property("createdAt"), Some(PropertyValue::Timestamp(ms)) if *ms > 0));
        assert!(v.property("manufacturer").is_none());
    }

    #[test]
    fn test_asset_vertex_gets_domain_attributes() {
        let mut attrs = FakeAttributes::new(StdRng::seed_from_u64(1));
        let v = factory().make_vertex("1-2-0-3", 4, "1-2-0", &mut attrs);

        assert_eq!(v.label, "asset");
        assert_eq!(v.partition_key, "1-2");
        for key in ["manufacturer", "installedAt", "serial", "comments"] {
            assert!(v.property(key).is_some(), "missing {}", key);
        }
        let comments = v.property("comments").and_then(|c| c.as_str()).unwrap();
        assert_eq!(comments.split(' ').count(), COMMENT_WORDS);
    }

    #[test]
    fn test_edge_shape() {
        let e = factory().make_edge("child", "1-2-0", "1-2-0-3", None);
        assert_eq!(e.id, "1-2-0 -> 1-2-0-3");
        assert_eq!(e.source_partition_key, "1-2");
        assert_eq!(e.destination_partition_key, "1-2");
        assert_eq!(e.source_label, "node");
        assert_eq!(e.destination_label, "asset");
        assert_eq!(e.property("model"), Some(&PropertyValue::from("primary")));

        let cross = factory().make_edge("process_3", "1-0", "1-4", Some(" #3.1"));
        assert_eq!(cross.id, "1-0 -> 1-4 #3.1");
        assert_eq!(cross.destination_partition_key, "1-4");
    }

    #[test]
    fn test_root_partition_strategy() {
        let f = ElementFactory::new(4, PartitionStrategy::Root, "pk");
        let mut attrs = FakeAttributes::new(StdRng::seed_from_u64(1));
        let v = f.make_vertex("1-5-2", 3, "1-5", &mut attrs);
        assert_eq!(v.partition_key, "1");
        assert_eq!(v.property("pk"), Some(&PropertyValue::from("1")));
    }
}
