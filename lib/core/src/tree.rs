// Depth-first tree expansion.
//
// Walks the hierarchy with an explicit frame stack instead of recursion. Each
// vertex is enqueued before the edge to its parent and before anything below it;
// children are pushed in reverse so they come off the stack in index order.
// Every emitted id is offered to the endpoint pool for later cross-edges.

use crate::element::LABEL_CHILD;
use crate::{
    id, AttributeProvider, Batcher, BulkSink, ElementFactory, EndpointPool, FanOut, Result,
};
use rand::Rng;
use tracing::trace;

/// What a tree generation pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub vertices: u64,
    pub edges: u64,
    pub max_level_reached: u32,
}

struct Frame {
    id: String,
    parent_id: String,
    level: u32,
}

pub struct TreeGenerator<'a> {
    factory: &'a ElementFactory,
    fan_out: &'a FanOut,
    max_depth: u32,
}

impl<'a> TreeGenerator<'a> {
    pub fn new(factory: &'a ElementFactory, fan_out: &'a FanOut, max_depth: u32) -> Self {
        Self {
            factory,
            fan_out,
            max_depth,
        }
    }

    pub async fn generate<R, A, S>(
        &self,
        root_id: &str,
        rng: &mut R,
        attributes: &mut A,
        endpoints: &mut EndpointPool,
        batcher: &mut Batcher<S>,
    ) -> Result<TreeStats>
    where
        R: Rng + ?Sized,
        A: AttributeProvider + ?Sized,
        S: BulkSink,
    {
        let mut stats = TreeStats::default();
        let mut stack = vec![Frame {
            id: root_id.to_string(),
            parent_id: String::new(),
            level: 1,
        }];

        while let Some(frame) = stack.pop() {
            if frame.level > self.max_depth {
                continue;
            }
            trace!("{} {}", "-".repeat(frame.level as usize), frame.id);

            let vertex = self
                .factory
                .make_vertex(&frame.id, frame.level, &frame.parent_id, attributes);
            batcher.enqueue(vertex).await?;
            endpoints.offer(&frame.id, frame.level, rng);
            stats.vertices += 1;
            stats.max_level_reached = stats.max_level_reached.max(frame.level);

            if !frame.parent_id.is_empty() {
                let edge = self
                    .factory
                    .make_edge(LABEL_CHILD, &frame.parent_id, &frame.id, None);
                batcher.enqueue(edge).await?;
                stats.edges += 1;
            }

            if frame.level < self.max_depth {
                let child_count = self.fan_out.child_count(frame.level, rng);
                for i in (0..child_count).rev() {
                    stack.push(Frame {
                        id: id::child_id(&frame.id, i),
                        parent_id: frame.id.clone(),
                        level: frame.level + 1,
                    });
                }
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BulkImportResponse, FakeAttributes, GraphElement, PartitionStrategy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        elements: Mutex<Vec<GraphElement>>,
    }

    impl BulkSink for Recorder {
        async fn bulk_import(&self, elements: &[GraphElement]) -> Result<BulkImportResponse> {
            self.elements.lock().unwrap().extend_from_slice(elements);
            Ok(BulkImportResponse::accepted(elements.len()))
        }
    }

    async fn generate(
        fan_out: FanOut,
        max_depth: u32,
        batch_size: usize,
    ) -> (TreeStats, Vec<GraphElement>) {
        let factory = ElementFactory::new(4, PartitionStrategy::PathPrefix, "partitionId");
        let mut rng = StdRng::seed_from_u64(42);
        let mut attrs = FakeAttributes::new(StdRng::seed_from_u64(43));
        let mut batcher = Batcher::new(Recorder::default(), batch_size);

        let stats = TreeGenerator::new(&factory, &fan_out, max_depth)
            .generate("1", &mut rng, &mut attrs, &mut EndpointPool::disabled(), &mut batcher)
            .await
            .unwrap();
        batcher.finish().await.unwrap();
        let elements = batcher.into_sink().elements.into_inner().unwrap();
        (stats, elements)
    }

    #[tokio::test]
    async fn test_small_tree_in_depth_first_order() {
        let (stats, elements) = generate(FanOut::Uniform(2), 3, 100).await;
        assert_eq!(stats.vertices, 7);
        assert_eq!(stats.edges, 6);
        assert_eq!(stats.max_level_reached, 3);

        let order: Vec<&str> = elements.iter().map(|e| e.id()).collect();
        assert_eq!(
            order,
            vec![
                "1",
                "1-0", "1 -> 1-0",
                "1-0-0", "1-0 -> 1-0-0",
                "1-0-1", "1-0 -> 1-0-1",
                "1-1", "1 -> 1-1",
                "1-1-0", "1-1 -> 1-1-0",
                "1-1-1", "1-1 -> 1-1-1",
            ]
        );
    }

    #[tokio::test]
    async fn test_vertex_counts_per_level_are_products() {
        let (_, elements) = generate(FanOut::Uniform(3), 4, 17).await;
        let mut per_level = [0u64; 5];
        for e in &elements {
            if let Some(v) = e.as_vertex() {
                per_level[id::level_of(&v.id) as usize] += 1;
            }
        }
        assert_eq!(&per_level[1..], &[1, 3, 9, 27]);
    }

    #[tokio::test]
    async fn test_child_edges_point_one_level_down() {
        let (_, elements) = generate(FanOut::default_table(), 3, 50).await;
        let mut seen = std::collections::HashSet::new();
        for e in &elements {
            match e {
                GraphElement::Vertex(v) => {
                    seen.insert(v.id.clone());
                }
                GraphElement::Edge(edge) => {
                    assert_eq!(edge.label, "child");
                    let (parent, _) = edge.destination_id.rsplit_once('-').unwrap();
                    assert_eq!(parent, edge.source_id);
                    // Both endpoints exist before the edge is emitted.
                    assert!(seen.contains(&edge.source_id));
                    assert!(seen.contains(&edge.destination_id));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_depth_one_is_just_the_root() {
        let (stats, elements) = generate(FanOut::Uniform(5), 1, 10).await;
        assert_eq!(stats.vertices, 1);
        assert_eq!(stats.edges, 0);
        assert_eq!(elements.len(), 1);
    }

    #[tokio::test]
    async fn test_pool_collects_requested_level() {
        let factory = ElementFactory::new(4, PartitionStrategy::PathPrefix, "partitionId");
        let fan_out = FanOut::Uniform(3);
        let mut rng = StdRng::seed_from_u64(42);
        let mut attrs = FakeAttributes::new(StdRng::seed_from_u64(43));
        let mut batcher = Batcher::new(Recorder::default(), 64);
        let mut pool = EndpointPool::new(3, 100);

        TreeGenerator::new(&factory, &fan_out, 4)
            .generate("1", &mut rng, &mut attrs, &mut pool, &mut batcher)
            .await
            .unwrap();
        assert_eq!(pool.seen(), 9);
        assert_eq!(pool.len(), 9);
        assert!(pool.ids().iter().all(|id| id::level_of(id) == 3));
    }

    #[tokio::test]
    async fn test_labels_follow_threshold() {
        let (_, elements) = generate(FanOut::Uniform(1), 5, 10).await;
        let labels: Vec<&str> = elements
            .iter()
            .filter_map(|e| e.as_vertex())
            .map(|v| v.label.as_str())
            .collect();
        assert_eq!(labels, vec!["node", "node", "node", "asset", "asset"]);
    }
}
