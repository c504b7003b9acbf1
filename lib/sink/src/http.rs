//! HTTP plumbing shared by the network sinks.
//!
//! [`HttpBulkSink`] does not speak a store's native protocol. It expects a bulk-import
//! endpoint in front of the store (a gateway or loader service) with this contract:
//!
//! - `POST {AccountEndpoint}/dbs/{Database}/colls/{Collection}/bulk`
//! - `authorization` header carrying the account key from the connection string as-is
//! - body: JSON array of elements, each tagged `"type": "vertex"` or `"type": "edge"`
//! - 2xx reply: `{"acceptedCount": <n>, "badElements": [<rejected element>...]}`,
//!   both fields optional; any bad element aborts the run
//! - 429 reply: throttled, with an optional `x-ms-retry-after-ms` header; retried
//! - any other status: the run fails with the status and body text
//!
//! Without such an endpoint use the statement transport, which posts one
//! `{"gremlin": "..."}` request per element to the Gremlin HTTP endpoint.

use crate::ConnectionString;
use graphload_core::{BulkImportResponse, BulkSink, Error, GraphElement, Result, RetryPolicy};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

const RETRY_AFTER_HEADER: &str = "x-ms-retry-after-ms";

/// One HTTP client per run, plus the endpoint and credentials it talks to.
#[derive(Clone)]
pub struct HttpSettings {
    client: Client,
    endpoint: String,
    account_key: String,
}

impl HttpSettings {
    pub fn new(
        endpoint: impl Into<String>,
        account_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Sink(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            account_key: account_key.into(),
        })
    }

    pub fn from_connection(conn: &ConnectionString, timeout: Duration) -> Result<Self> {
        Self::new(conn.endpoint(), conn.account_key.clone(), timeout)
    }

    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, &self.account_key)
    }
}

/// Maps a non-success response to the error kind the pipeline cares about.
pub(crate) async fn status_error(response: Response) -> Error {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis);
        return Error::RateLimited { retry_after };
    }
    let body = response.text().await.unwrap_or_default();
    Error::Sink(format!("HTTP {}: {}", status, body))
}

/// Bulk import over HTTP: the whole batch goes out as one JSON array.
pub struct HttpBulkSink {
    settings: HttpSettings,
    url: String,
    retry: RetryPolicy,
}

impl HttpBulkSink {
    pub fn new(
        settings: HttpSettings,
        database: &str,
        collection: &str,
        retry: RetryPolicy,
    ) -> Self {
        let url = format!(
            "{}/dbs/{}/colls/{}/bulk",
            settings.endpoint(),
            database,
            collection
        );
        Self { settings, url, retry }
    }

    pub fn from_connection(
        conn: &ConnectionString,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let settings = HttpSettings::from_connection(conn, timeout)?;
        Ok(Self::new(settings, &conn.database, &conn.collection, retry))
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(&self, elements: &[GraphElement]) -> Result<BulkImportResponse> {
        let response = self
            .settings
            .post(&self.url)
            .json(elements)
            .send()
            .await
            .map_err(|e| Error::Sink(format!("bulk import failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response
            .json::<BulkImportResponse>()
            .await
            .map_err(|e| Error::Sink(format!("unreadable bulk import response: {}", e)))
    }
}

impl BulkSink for HttpBulkSink {
    async fn bulk_import(&self, elements: &[GraphElement]) -> Result<BulkImportResponse> {
        debug!(count = elements.len(), url = %self.url, "bulk import");
        self.retry.run(|| self.send(elements)).await
    }
}
