use graphload_core::{BulkImportResponse, BulkSink, GraphElement, Result};
use parking_lot::Mutex;

type Rejector = Box<dyn Fn(&GraphElement) -> bool + Send + Sync>;

/// Keeps every batch in memory. Used by tests and benchmarks.
#[derive(Default)]
pub struct MemorySink {
    batches: Mutex<Vec<Vec<GraphElement>>>,
    reject: Option<Rejector>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report elements matching `predicate` as bad input instead of storing them.
    pub fn rejecting<F>(predicate: F) -> Self
    where
        F: Fn(&GraphElement) -> bool + Send + Sync + 'static,
    {
        Self {
            batches: Mutex::new(Vec::new()),
            reject: Some(Box::new(predicate)),
        }
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().iter().map(Vec::len).collect()
    }

    pub fn flush_count(&self) -> usize {
        self.batches.lock().len()
    }

    /// All stored elements in submission order.
    pub fn elements(&self) -> Vec<GraphElement> {
        self.batches.lock().iter().flatten().cloned().collect()
    }
}

impl BulkSink for MemorySink {
    async fn bulk_import(&self, elements: &[GraphElement]) -> Result<BulkImportResponse> {
        let mut bad_elements = Vec::new();
        let mut accepted = Vec::with_capacity(elements.len());
        for element in elements {
            match &self.reject {
                Some(reject) if reject(element) => {
                    bad_elements.push(serde_json::to_value(element)?)
                }
                _ => accepted.push(element.clone()),
            }
        }

        let accepted_count = accepted.len();
        self.batches.lock().push(accepted);
        Ok(BulkImportResponse {
            accepted_count,
            bad_elements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphload_core::GraphVertex;

    fn vertex(id: &str) -> GraphElement {
        GraphVertex::new(id.into(), "node".into(), id.into()).into()
    }

    #[tokio::test]
    async fn test_rejecting_sink_reports_bad_elements() {
        let sink = MemorySink::rejecting(|e| e.id() == "bad");
        let response = sink
            .bulk_import(&[vertex("1"), vertex("bad"), vertex("2")])
            .await
            .unwrap();
        assert_eq!(response.accepted_count, 2);
        assert_eq!(response.bad_elements.len(), 1);
        assert_eq!(response.bad_elements[0]["id"], "bad");
        assert_eq!(sink.batch_sizes(), vec![2]);
    }
}
