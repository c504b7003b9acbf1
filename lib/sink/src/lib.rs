//! Concrete bulk sinks for graphload.
//!
//! - [`HttpBulkSink`] - one HTTP round trip per batch
//! - [`StatementSink`] - one Gremlin statement per element, with retry
//! - [`JsonLinesSink`] - append-only file, no network
//! - [`MemorySink`] - in-process, for tests and benchmarks

pub mod connection;
pub mod http;
pub mod statement;
pub mod gremlin;
pub mod jsonl;
pub mod memory;

pub use connection::ConnectionString;
pub use http::{HttpBulkSink, HttpSettings};
pub use gremlin::{GremlinClient, HttpGremlinClient, StatementSink};
pub use jsonl::JsonLinesSink;
pub use memory::MemorySink;
