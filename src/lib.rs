//! # graphload
//!
//! Generates a large synthetic asset hierarchy and bulk loads it into a
//! Gremlin-compatible graph store, as test data for load and traversal testing.
//!
//! ## What gets generated
//!
//! - A tree of `node` vertices whose deeper levels become `asset` vertices
//!   carrying manufacturer, install time, serial and free-text comments
//! - A `child` edge from every vertex to each of its children
//! - Optional `process_<n>` cross-edges between random deep vertices
//!
//! Ids are paths (`1-3-0-7`), and the partition key of a vertex is the first
//! two segments of its id, so each top-level subtree lands in its own partition.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! # AccountEndpoint=https://...;AccountKey=...;ApiKind=Gremlin;Database=db01;Collection=col01
//! graphload -c "$CONNECTION_STRING" -n 5 -a 100 -b 500
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use graphload::prelude::*;
//!
//! # async fn demo() -> Result<()> {
//! let config = GenerationConfig {
//!     fan_out: FanOut::Uniform(2),
//!     max_depth: 3,
//!     batch_size: 100,
//!     traversals: 0,
//!     ..Default::default()
//! };
//! let sink = MemorySink::new();
//! let summary = GenerationSession::new(config, &sink)?.run().await?;
//! assert_eq!(sink.flush_count(), 1);
//! assert_eq!(summary.total_elements, 13);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - `graphload-core` - ids, elements, tree and cross-edge generation, batching, retry
//! - `graphload-sink` - HTTP bulk import, Gremlin statements, JSON-lines and in-memory sinks

// Re-export core types
pub use graphload_core::{
    id, AttributeProvider, BatchStats, Batcher, BulkImportResponse, BulkSink,
    CrossEdgeGenerator, ElementFactory, EndpointPool, Error, FakeAttributes, FanOut,
    GenerationConfig, GenerationSession, GraphEdge, GraphElement, GraphVertex,
    PartitionStrategy, PropertyValue, Result, RetryPolicy, RunSummary, TreeGenerator,
    TreeStats,
};

// Re-export sinks
pub use graphload_sink::{
    statement, ConnectionString, GremlinClient, HttpBulkSink, HttpGremlinClient,
    HttpSettings, JsonLinesSink, MemorySink, StatementSink,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BulkSink, ConnectionString, Error, FanOut, GenerationConfig, GenerationSession,
        GraphEdge, GraphElement, GraphVertex, JsonLinesSink, MemorySink, PartitionStrategy,
        Result, RunSummary,
    };
}
