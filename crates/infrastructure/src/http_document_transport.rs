use async_trait::async_trait;
use crpt_application::DocumentTransport;
use crpt_core::{AppError, AppResult};
use reqwest::header;
use tracing::debug;

/// Document creation endpoint of the goods tracking API.
pub const DEFAULT_SUBMISSION_ENDPOINT: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

/// Request header carrying the pre-computed document signature.
pub const SIGNATURE_HEADER: &str = "sign";

/// HTTP implementation of the document transport port.
///
/// Posts the payload as the request body with the signature in the `sign`
/// header. Timeouts belong to the injected client.
#[derive(Clone)]
pub struct HttpDocumentTransport {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpDocumentTransport {
    /// Creates a transport posting to `endpoint`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
        }
    }

    /// Returns the endpoint documents are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl DocumentTransport for HttpDocumentTransport {
    async fn send(&self, payload: &str, signature: &str) -> AppResult<u16> {
        let response = self
            .http_client
            .post(self.endpoint.as_str())
            .header(SIGNATURE_HEADER, signature)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload.to_owned())
            .send()
            .await
            .map_err(|error| {
                AppError::Transport(format!(
                    "failed to post document to '{}': {error}",
                    self.endpoint
                ))
            })?;

        let status = response.status().as_u16();
        debug!(
            endpoint = %self.endpoint,
            status,
            payload_bytes = payload.len(),
            "document endpoint responded"
        );

        Ok(status)
    }
}
