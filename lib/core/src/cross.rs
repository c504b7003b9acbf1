use crate::{Batcher, BulkSink, ElementFactory, Result};
use rand::Rng;
use tracing::{debug, warn};

/// Cross-edges created per traversal.
pub const EDGES_PER_TRAVERSAL: u32 = 10;

/// Upper bound on the number of ids an [`EndpointPool`] keeps.
pub const DEFAULT_POOL_CAPACITY: usize = 100_000;

/// Uniform sample of the vertex ids generated at one level.
///
/// The tree generator offers every id it emits; ids at the pool's level are kept
/// with reservoir sampling, so memory stays at `capacity` ids no matter how wide
/// the level is and every kept id is a vertex that was actually enqueued.
#[derive(Debug, Clone, Default)]
pub struct EndpointPool {
    level: u32,
    capacity: usize,
    seen: u64,
    ids: Vec<String>,
}

impl EndpointPool {
    /// Pool for vertices at `level` (1-based, the root is level 1).
    pub fn new(level: u32, capacity: usize) -> Self {
        Self {
            level,
            capacity,
            seen: 0,
            ids: Vec::with_capacity(capacity.min(1024)),
        }
    }

    /// A pool that never keeps anything.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn offer<R: Rng + ?Sized>(&mut self, id: &str, level: u32, rng: &mut R) {
        if level != self.level || self.capacity == 0 {
            return;
        }
        self.seen += 1;
        if self.ids.len() < self.capacity {
            self.ids.push(id.to_string());
            return;
        }
        let slot = rng.random_range(0..self.seen);
        if slot < self.capacity as u64 {
            self.ids[slot as usize] = id.to_string();
        }
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Ids offered at the pool's level, kept or not.
    #[inline]
    pub fn seen(&self) -> u64 {
        self.seen
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Two ids drawn uniformly, distinct whenever the pool holds more than one.
    fn pick_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(&str, &str)> {
        match self.ids.len() {
            0 => None,
            1 => Some((self.ids[0].as_str(), self.ids[0].as_str())),
            len => {
                let source = rng.random_range(0..len);
                let mut destination = rng.random_range(0..len - 1);
                if destination >= source {
                    destination += 1;
                }
                Some((self.ids[source].as_str(), self.ids[destination].as_str()))
            }
        }
    }
}

/// Adds `process_<n>` edges between random vertices at a fixed depth, on top of
/// the tree, so traversal queries have something other than parent links to walk.
///
/// Endpoints come from an [`EndpointPool`] filled while the tree was generated,
/// so every edge connects two vertices that exist whatever the fan-out policy.
pub struct CrossEdgeGenerator<'a> {
    factory: &'a ElementFactory,
    pool: &'a EndpointPool,
}

impl<'a> CrossEdgeGenerator<'a> {
    pub fn new(factory: &'a ElementFactory, pool: &'a EndpointPool) -> Self {
        Self { factory, pool }
    }

    /// Enqueue `traversals * EDGES_PER_TRAVERSAL` edges; returns how many were created.
    ///
    /// Nothing is created when no vertex was generated at the pool's level.
    pub async fn generate<R, S>(
        &self,
        traversals: u32,
        rng: &mut R,
        batcher: &mut Batcher<S>,
    ) -> Result<u64>
    where
        R: Rng + ?Sized,
        S: BulkSink,
    {
        if traversals > 0 && self.pool.is_empty() {
            warn!(
                level = self.pool.level(),
                "no vertices at cross-edge level, skipping cross-edges"
            );
            return Ok(0);
        }

        let mut created = 0u64;
        for traversal in 0..traversals {
            let label = format!("process_{}", traversal);
            for n in 0..EDGES_PER_TRAVERSAL {
                let Some((source, destination)) = self.pool.pick_pair(rng) else {
                    return Ok(created);
                };
                let suffix = format!(" #{}.{}", traversal, n);

                let edge = self
                    .factory
                    .make_edge(&label, source, destination, Some(&suffix));
                batcher.enqueue(edge).await?;
                created += 1;
            }
            debug!(traversal, "traversal edges queued");
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        id, BulkImportResponse, FakeAttributes, FanOut, GraphElement, PartitionStrategy,
        TreeGenerator,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<GraphElement>>);

    impl BulkSink for Recorder {
        async fn bulk_import(&self, elements: &[GraphElement]) -> Result<BulkImportResponse> {
            self.0.lock().unwrap().extend_from_slice(elements);
            Ok(BulkImportResponse::accepted(elements.len()))
        }
    }

    fn factory() -> ElementFactory {
        ElementFactory::new(4, PartitionStrategy::PathPrefix, "partitionId")
    }

    #[test]
    fn test_pool_keeps_only_its_level() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut pool = EndpointPool::new(3, 10);
        pool.offer("1", 1, &mut rng);
        pool.offer("1-0", 2, &mut rng);
        pool.offer("1-0-0", 3, &mut rng);
        pool.offer("1-0-1", 3, &mut rng);
        assert_eq!(pool.ids(), ["1-0-0", "1-0-1"]);
        assert_eq!(pool.seen(), 2);

        let mut disabled = EndpointPool::disabled();
        disabled.offer("1-0-0", 3, &mut rng);
        assert!(disabled.is_empty());
    }

    #[test]
    fn test_pool_is_bounded_and_samples_the_whole_level() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pool = EndpointPool::new(2, 16);
        for i in 0..1000 {
            pool.offer(&id::child_id("1", i), 2, &mut rng);
        }
        assert_eq!(pool.len(), 16);
        assert_eq!(pool.seen(), 1000);

        let distinct: HashSet<&String> = pool.ids().iter().collect();
        assert_eq!(distinct.len(), 16);
        // Replacement reaches past the first `capacity` offers.
        assert!(pool
            .ids()
            .iter()
            .any(|id| id.rsplit('-').next().unwrap().parse::<u32>().unwrap() >= 16));
    }

    #[tokio::test]
    async fn test_cross_edges_shape() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut pool = EndpointPool::new(5, 100);
        for a in 0..3 {
            for b in 0..3 {
                for c in 0..3 {
                    for d in 0..3 {
                        pool.offer(&format!("1-{}-{}-{}-{}", a, b, c, d), 5, &mut rng);
                    }
                }
            }
        }
        let members: HashSet<String> = pool.ids().iter().cloned().collect();
        assert_eq!(members.len(), 81);

        let factory = factory();
        let mut batcher = Batcher::new(Recorder::default(), 7);
        let created = CrossEdgeGenerator::new(&factory, &pool)
            .generate(3, &mut rng, &mut batcher)
            .await
            .unwrap();
        batcher.finish().await.unwrap();
        assert_eq!(created, 30);

        let elements = batcher.into_sink().0.into_inner().unwrap();
        assert_eq!(elements.len(), 30);

        let mut ids = HashSet::new();
        for (i, element) in elements.iter().enumerate() {
            let edge = element.as_edge().unwrap();
            let traversal = i as u32 / EDGES_PER_TRAVERSAL;
            let suffix = format!(" #{}.{}", traversal, i as u32 % EDGES_PER_TRAVERSAL);
            assert_eq!(edge.label, format!("process_{}", traversal));
            assert!(edge.id.ends_with(&suffix));
            assert!(members.contains(&edge.source_id));
            assert!(members.contains(&edge.destination_id));
            assert_ne!(edge.source_id, edge.destination_id);
            assert_eq!(edge.source_label, "asset");
            assert!(ids.insert(edge.id.clone()), "duplicate edge id {}", edge.id);
        }
    }

    #[tokio::test]
    async fn test_table_fan_out_spreads_endpoints() {
        let factory = factory();
        let fan_out = FanOut::default_table();
        let mut rng = StdRng::seed_from_u64(1);
        let mut attrs = FakeAttributes::new(StdRng::seed_from_u64(2));
        let mut batcher = Batcher::new(Recorder::default(), 500);
        let mut pool = EndpointPool::new(3, DEFAULT_POOL_CAPACITY);

        TreeGenerator::new(&factory, &fan_out, 3)
            .generate("1", &mut rng, &mut attrs, &mut pool, &mut batcher)
            .await
            .unwrap();
        let created = CrossEdgeGenerator::new(&factory, &pool)
            .generate(50, &mut rng, &mut batcher)
            .await
            .unwrap();
        batcher.finish().await.unwrap();
        assert_eq!(created, 500);

        let elements = batcher.into_sink().0.into_inner().unwrap();
        let vertices: HashSet<&str> = elements
            .iter()
            .filter_map(|e| e.as_vertex())
            .map(|v| v.id.as_str())
            .collect();

        let mut endpoints = HashSet::new();
        for edge in elements.iter().filter_map(|e| e.as_edge()) {
            if edge.label == "child" {
                continue;
            }
            assert!(vertices.contains(edge.source_id.as_str()), "{}", edge.id);
            assert!(vertices.contains(edge.destination_id.as_str()), "{}", edge.id);
            assert_ne!(edge.source_id, edge.destination_id);
            endpoints.insert(edge.source_id.as_str());
            endpoints.insert(edge.destination_id.as_str());
        }
        assert!(endpoints.len() > 1, "endpoints: {:?}", endpoints);
    }

    #[tokio::test]
    async fn test_empty_pool_creates_nothing() {
        let factory = factory();
        let pool = EndpointPool::new(4, 10);
        let mut rng = StdRng::seed_from_u64(3);
        let mut batcher = Batcher::new(Recorder::default(), 10);

        let created = CrossEdgeGenerator::new(&factory, &pool)
            .generate(5, &mut rng, &mut batcher)
            .await
            .unwrap();
        batcher.finish().await.unwrap();
        assert_eq!(created, 0);
        assert!(batcher.sink().0.lock().unwrap().is_empty());
    }
}
