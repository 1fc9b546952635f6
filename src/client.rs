use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::adapter::{
    ReqwestTransport, RestError, RestErrorKind, RestRequest, RestResponse, RestTransport,
};
use crate::config::ClientConfig;
use crate::content::{ContentRecord, ContentResource};
use crate::error::SubmissionError;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const STATUS_CREATED: u16 = 201;

/// Submits content records to `<base_url>/content`.
///
/// Each call to [`ContentClient::submit`] issues exactly one POST. Nothing is
/// retried or deduplicated: submitting the same record twice creates two
/// resources on the server.
#[derive(Clone)]
pub struct ContentClient {
    config: ClientConfig,
    endpoint: String,
    transport: Arc<dyn RestTransport>,
}

impl ContentClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    pub fn with_transport<T>(config: ClientConfig, transport: T) -> Self
    where
        T: RestTransport + 'static,
    {
        let endpoint = config.content_endpoint();
        Self {
            config,
            endpoint,
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, record: &ContentRecord) -> Result<RestRequest, RestError> {
        let body = record.to_json_bytes()?;
        Ok(RestRequest::post(self.endpoint.as_str())
            .with_header(API_KEY_HEADER, self.config.api_key.clone())
            .with_header("content-type", "application/json")
            .with_body(body))
    }

    pub async fn submit(&self, record: &ContentRecord) -> Result<ContentResource, SubmissionError> {
        let request = self.build_request(record)?;
        debug!(
            endpoint = %self.endpoint,
            title = %record.title,
            category = %record.category,
            "submitting content"
        );

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                error!(
                    endpoint = %self.endpoint,
                    kind = %err.kind,
                    "content submission failed: {}",
                    err.message
                );
                return Err(err.into());
            }
        };

        interpret(response)
    }

    /// Same as [`ContentClient::submit`], blocking the calling thread on a
    /// single-threaded runtime until the exchange finishes. Must not be called
    /// from inside another tokio runtime.
    pub fn submit_blocking(
        &self,
        record: &ContentRecord,
    ) -> Result<ContentResource, SubmissionError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| {
                RestError::new(
                    RestErrorKind::Internal,
                    format!("failed to start runtime: {err}"),
                )
            })?;
        runtime.block_on(self.submit(record))
    }
}

fn interpret(response: RestResponse) -> Result<ContentResource, SubmissionError> {
    let status = response.status();
    if status != STATUS_CREATED {
        let body_text = response.text();
        warn!(status, body = %body_text, "content rejected");
        return Err(SubmissionError::Rejected {
            status_code: status,
            body_text,
        });
    }

    let resource: ContentResource = response.json().map_err(|err| {
        error!(status, "created response was not valid JSON: {}", err.message);
        err
    })?;
    info!(status, elapsed_ms = response.elapsed.as_millis() as u64, "content created");
    Ok(resource)
}
