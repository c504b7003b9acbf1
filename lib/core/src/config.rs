use crate::{Error, PartitionStrategy, Result};
use rand::Rng;
use std::ops::Range;

/// Default per-level child counts for [`FanOut::Table`]. Ranges are half-open.
pub const DEFAULT_LEVEL_TABLE: [Range<u32>; 5] = [1..10, 1..100, 1..40, 1..20, 1..20];

/// How many children a vertex gets at a given level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FanOut {
    /// Same number of children on every level.
    Uniform(u32),
    /// Random count drawn from `table[level - 1]`; levels past the table are leaves.
    Table(Vec<Range<u32>>),
}

impl Default for FanOut {
    fn default() -> Self {
        FanOut::Uniform(18)
    }
}

impl FanOut {
    pub fn default_table() -> Self {
        FanOut::Table(DEFAULT_LEVEL_TABLE.to_vec())
    }

    /// Child count for a vertex at `level` (1-based).
    pub fn child_count<R: Rng + ?Sized>(&self, level: u32, rng: &mut R) -> u32 {
        match self {
            FanOut::Uniform(n) => *n,
            FanOut::Table(table) => match table.get(level.saturating_sub(1) as usize) {
                Some(range) if range.start < range.end => rng.random_range(range.clone()),
                Some(range) => range.start,
                None => 0,
            },
        }
    }
}

/// Parameters of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub root_id: String,
    pub fan_out: FanOut,
    /// Deepest level that still gets vertices (inclusive).
    pub max_depth: u32,
    /// Vertices at this level or deeper are labelled `asset`.
    pub asset_threshold: u32,
    pub batch_size: usize,
    /// Each traversal adds [`crate::cross::EDGES_PER_TRAVERSAL`] cross-edges.
    pub traversals: u32,
    /// Path segments below the root for cross-edge endpoints; `None` means the leaf level.
    pub cross_edge_depth: Option<u32>,
    pub partition: PartitionStrategy,
    pub partition_property: String,
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            root_id: "1".to_string(),
            fan_out: FanOut::default(),
            max_depth: 5,
            asset_threshold: 4,
            batch_size: 1000,
            traversals: 20_000,
            cross_edge_depth: None,
            partition: PartitionStrategy::default(),
            partition_property: "partitionId".to_string(),
            seed: None,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.root_id.trim().is_empty() {
            return Err(Error::InvalidConfig("root id must not be empty".to_string()));
        }
        if self.root_id.contains(crate::id::SEGMENT_SEPARATOR) {
            return Err(Error::InvalidConfig(format!(
                "root id '{}' must not contain '{}'",
                self.root_id,
                crate::id::SEGMENT_SEPARATOR
            )));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch size must be at least 1".to_string()));
        }
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig("max depth must be at least 1".to_string()));
        }
        if self.asset_threshold == 0 {
            return Err(Error::InvalidConfig("asset threshold must be at least 1".to_string()));
        }
        if self.partition_property.is_empty() {
            return Err(Error::InvalidConfig(
                "partition property must not be empty".to_string(),
            ));
        }
        if self.fan_out == FanOut::Uniform(0) && self.traversals > 0 && self.max_depth > 1 {
            return Err(Error::InvalidConfig(
                "cross-edges need at least one child per node".to_string(),
            ));
        }
        if let Some(depth) = self.cross_edge_depth {
            if depth >= self.max_depth {
                return Err(Error::InvalidConfig(format!(
                    "cross-edge depth {} must be below max depth {}",
                    depth, self.max_depth
                )));
            }
        }
        Ok(())
    }

    /// Depth below the root at which cross-edge endpoints are sampled.
    #[inline]
    pub fn effective_cross_edge_depth(&self) -> u32 {
        self.cross_edge_depth
            .unwrap_or_else(|| self.max_depth.saturating_sub(1))
    }
}
