// Bounded batching in front of a bulk sink.
// Elements accumulate until the batch is full, then go out in one bulk call.

use crate::{Error, GraphElement, Result};
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, error, info};

/// Outcome of one bulk import call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportResponse {
    #[serde(default)]
    pub accepted_count: usize,
    #[serde(default)]
    pub bad_elements: Vec<serde_json::Value>,
}

impl BulkImportResponse {
    #[inline]
    pub fn accepted(count: usize) -> Self {
        Self {
            accepted_count: count,
            bad_elements: Vec::new(),
        }
    }
}

/// Anything that can take a batch of graph elements in one call.
pub trait BulkSink {
    fn bulk_import(
        &self,
        elements: &[GraphElement],
    ) -> impl Future<Output = Result<BulkImportResponse>>;
}

impl<S: BulkSink> BulkSink for &S {
    fn bulk_import(
        &self,
        elements: &[GraphElement],
    ) -> impl Future<Output = Result<BulkImportResponse>> {
        (**self).bulk_import(elements)
    }
}

/// Counters reported when a batcher is finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total_enqueued: u64,
    pub submitted: u64,
    pub flushes: u64,
}

pub struct Batcher<S> {
    sink: S,
    batch_size: usize,
    buffer: Vec<GraphElement>,
    total_enqueued: u64,
    submitted: u64,
    flushes: u64,
    poisoned: bool,
}

impl<S: BulkSink> Batcher<S> {
    pub fn new(sink: S, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            sink,
            batch_size,
            buffer: Vec::with_capacity(batch_size),
            total_enqueued: 0,
            submitted: 0,
            flushes: 0,
            poisoned: false,
        }
    }

    /// Queue one element, flushing when the batch is full.
    pub async fn enqueue(&mut self, element: impl Into<GraphElement>) -> Result<()> {
        if self.poisoned {
            return Err(Error::Poisoned);
        }
        self.buffer.push(element.into());
        self.total_enqueued += 1;

        if self.buffer.len() >= self.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Send the whole buffer in one bulk call. An empty buffer is a no-op.
    pub async fn flush(&mut self) -> Result<()> {
        if self.poisoned {
            return Err(Error::Poisoned);
        }
        if self.buffer.is_empty() {
            return Ok(());
        }

        let response = match self.sink.bulk_import(&self.buffer).await {
            Ok(response) => response,
            Err(e) => {
                self.poisoned = true;
                return Err(e);
            }
        };

        if !response.bad_elements.is_empty() {
            self.poisoned = true;
            let count = response.bad_elements.len();
            error!(count, "bulk import rejected elements");
            for bad in response.bad_elements.iter().take(5) {
                debug!(element = %bad, "rejected");
            }
            return Err(Error::BadElements { count });
        }

        self.submitted += self.buffer.len() as u64;
        self.flushes += 1;
        self.buffer.clear();
        info!(submitted = self.submitted, accepted = response.accepted_count, "batch flushed");
        Ok(())
    }

    /// Flush what is left and report the counters.
    pub async fn finish(&mut self) -> Result<BatchStats> {
        self.flush().await?;
        Ok(self.stats())
    }

    #[inline]
    pub fn stats(&self) -> BatchStats {
        BatchStats {
            total_enqueued: self.total_enqueued,
            submitted: self.submitted,
            flushes: self.flushes,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[inline]
    pub fn total_enqueued(&self) -> u64 {
        self.total_enqueued
    }

    #[inline]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
