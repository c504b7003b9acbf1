use crate::http::{status_error, HttpSettings};
use crate::statement::element_statement;
use graphload_core::{BulkImportResponse, BulkSink, GraphElement, Result, RetryPolicy};
use serde_json::json;
use std::future::Future;
use tracing::trace;

/// Single-statement submission API.
pub trait GremlinClient {
    fn submit(&self, statement: &str) -> impl Future<Output = Result<serde_json::Value>>;
}

/// Posts `{"gremlin": "<statement>"}` to the endpoint, the shape Gremlin
/// Server's HTTP channel accepts.
pub struct HttpGremlinClient {
    settings: HttpSettings,
}

impl HttpGremlinClient {
    pub fn new(settings: HttpSettings) -> Self {
        Self { settings }
    }
}

impl GremlinClient for HttpGremlinClient {
    async fn submit(&self, statement: &str) -> Result<serde_json::Value> {
        let response = self
            .settings
            .post(self.settings.endpoint())
            .json(&json!({ "gremlin": statement }))
            .send()
            .await
            .map_err(|e| graphload_core::Error::Sink(format!("submit failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| graphload_core::Error::Sink(format!("unreadable submit response: {}", e)))
    }
}

/// Bulk sink built on one-statement-at-a-time submission.
///
/// Each element becomes one Gremlin statement submitted under the retry
/// policy, so rate limiting never reaches the batcher.
pub struct StatementSink<C> {
    client: C,
    retry: RetryPolicy,
    partition_property: String,
}

impl<C: GremlinClient> StatementSink<C> {
    pub fn new(client: C, retry: RetryPolicy, partition_property: impl Into<String>) -> Self {
        Self {
            client,
            retry,
            partition_property: partition_property.into(),
        }
    }

    #[inline]
    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: GremlinClient> BulkSink for StatementSink<C> {
    async fn bulk_import(&self, elements: &[GraphElement]) -> Result<BulkImportResponse> {
        for element in elements {
            let statement = element_statement(element, &self.partition_property);
            trace!(%statement, "submitting");
            self.retry.run(|| self.client.submit(&statement)).await?;
        }
        Ok(BulkImportResponse::accepted(elements.len()))
    }
}
