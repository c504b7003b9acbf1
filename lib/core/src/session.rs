use crate::cross::DEFAULT_POOL_CAPACITY;
use crate::{
    BatchStats, Batcher, BulkSink, CrossEdgeGenerator, ElementFactory, EndpointPool,
    FakeAttributes, GenerationConfig, Result, TreeGenerator,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::info;

/// Totals of a finished run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub vertices: u64,
    pub edges: u64,
    pub cross_edges: u64,
    pub total_elements: u64,
    pub flushes: u64,
    pub elapsed: Duration,
}

/// Everything one generation run mutates: random source, attribute provider,
/// element factory and the batcher that owns the sink.
///
/// [`run`](Self::run) consumes the session, so a session produces exactly one
/// run. The sink lives inside the batcher and is dropped when the run ends,
/// whether it succeeds or fails; pass `&sink` to inspect it afterwards.
pub struct GenerationSession<S> {
    config: GenerationConfig,
    factory: ElementFactory,
    rng: StdRng,
    attributes: FakeAttributes<StdRng>,
    batcher: Batcher<S>,
}

impl<S: BulkSink> GenerationSession<S> {
    pub fn new(config: GenerationConfig, sink: S) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let attributes = FakeAttributes::new(StdRng::seed_from_u64(rng.random()));
        let factory = ElementFactory::from_config(&config);
        let batcher = Batcher::new(sink, config.batch_size);

        Ok(Self {
            config,
            factory,
            rng,
            attributes,
            batcher,
        })
    }

    #[inline]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate the tree, then the cross-edges, then drain the last batch.
    pub async fn run(mut self) -> Result<RunSummary> {
        let started = Instant::now();
        let root_id = self.config.root_id.trim().to_string();

        info!(
            root = %root_id,
            max_depth = self.config.max_depth,
            batch_size = self.config.batch_size,
            "generating tree"
        );
        let depth = self.config.effective_cross_edge_depth();
        let mut endpoints = if self.config.traversals > 0 {
            EndpointPool::new(depth + 1, DEFAULT_POOL_CAPACITY)
        } else {
            EndpointPool::disabled()
        };

        let tree = TreeGenerator::new(&self.factory, &self.config.fan_out, self.config.max_depth)
            .generate(
                &root_id,
                &mut self.rng,
                &mut self.attributes,
                &mut endpoints,
                &mut self.batcher,
            )
            .await?;
        info!(vertices = tree.vertices, edges = tree.edges, "tree generated");

        let cross_edges = if self.config.traversals > 0 {
            info!(
                traversals = self.config.traversals,
                depth,
                candidates = endpoints.seen(),
                pooled = endpoints.len(),
                "generating cross-edges"
            );
            CrossEdgeGenerator::new(&self.factory, &endpoints)
                .generate(self.config.traversals, &mut self.rng, &mut self.batcher)
                .await?
        } else {
            0
        };

        let BatchStats {
            total_enqueued,
            flushes,
            ..
        } = self.batcher.finish().await?;

        Ok(RunSummary {
            vertices: tree.vertices,
            edges: tree.edges,
            cross_edges,
            total_elements: total_enqueued,
            flushes,
            elapsed: started.elapsed(),
        })
    }
}
