//! # graphload Core
//!
//! Core library for the graphload generator.
//!
//! This crate provides the generation and ingestion pipeline:
//!
//! - [`id`] - Hierarchical ids and partition keys
//! - [`GraphVertex`] / [`GraphEdge`] - Elements handed to a sink
//! - [`ElementFactory`] - Labels, partitioning and synthetic attributes
//! - [`TreeGenerator`] - Depth-first fan-out of the main hierarchy
//! - [`CrossEdgeGenerator`] - Random non-tree edges
//! - [`Batcher`] - Bounded batching in front of a [`BulkSink`]
//! - [`RetryPolicy`] - Backoff on rate-limited submissions
//! - [`GenerationSession`] - One run, start to finish
//!
//! ## Example
//!
//! ```rust,no_run
//! use graphload_core::{
//!     BulkImportResponse, BulkSink, GenerationConfig, GenerationSession, GraphElement, Result,
//! };
//!
//! struct Discard;
//!
//! impl BulkSink for Discard {
//!     async fn bulk_import(&self, elements: &[GraphElement]) -> Result<BulkImportResponse> {
//!         Ok(BulkImportResponse::accepted(elements.len()))
//!     }
//! }
//!
//! # async fn demo() -> Result<()> {
//! let config = GenerationConfig { max_depth: 3, traversals: 0, ..Default::default() };
//! let session = GenerationSession::new(config, Discard)?;
//! let summary = session.run().await?;
//! println!("{} elements", summary.total_elements);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod id;
pub mod value;
pub mod element;
pub mod attributes;
pub mod config;
pub mod factory;
pub mod batch;
pub mod retry;
pub mod tree;
pub mod cross;
pub mod session;

pub use error::{Error, Result};
pub use id::PartitionStrategy;
pub use value::PropertyValue;
pub use element::{GraphEdge, GraphElement, GraphVertex, Properties};
pub use attributes::{AttributeProvider, FakeAttributes};
pub use config::{FanOut, GenerationConfig};
pub use factory::ElementFactory;
pub use batch::{BatchStats, Batcher, BulkImportResponse, BulkSink};
pub use retry::RetryPolicy;
pub use tree::{TreeGenerator, TreeStats};
pub use cross::{CrossEdgeGenerator, EndpointPool, EDGES_PER_TRAVERSAL};
pub use session::{GenerationSession, RunSummary};
