use std::sync::Arc;

use crpt_core::AppResult;
use crpt_domain::DocumentGoods;
use tracing::{info, warn};

use super::ports::{DocumentSerializer, DocumentTransport, SubmissionOutcome};
use crate::RateGate;

/// Application service for rate-limited document submission.
#[derive(Clone)]
pub struct DocumentSubmissionService {
    gate: Arc<RateGate>,
    serializer: Arc<dyn DocumentSerializer>,
    transport: Arc<dyn DocumentTransport>,
}

impl DocumentSubmissionService {
    /// Creates a new document submission service.
    #[must_use]
    pub fn new(
        gate: Arc<RateGate>,
        serializer: Arc<dyn DocumentSerializer>,
        transport: Arc<dyn DocumentTransport>,
    ) -> Self {
        Self {
            gate,
            serializer,
            transport,
        }
    }

    /// Returns the gate shared by every clone of this service.
    #[must_use]
    pub fn gate(&self) -> &Arc<RateGate> {
        &self.gate
    }

    /// Submits one document, waiting for rate limit capacity first.
    ///
    /// The admission is consumed even when serialization or delivery fails.
    /// A non-2xx answer is reported as `SubmissionOutcome::Rejected` and is
    /// not retried.
    pub async fn submit(
        &self,
        document: &DocumentGoods,
        signature: &str,
    ) -> AppResult<SubmissionOutcome> {
        let admission = self.gate.acquire().await;
        let payload = self.serializer.serialize(document)?;
        let status = self.transport.send(payload.as_str(), signature).await?;
        let outcome = SubmissionOutcome::from_status(status);
        let waited_ms = u64::try_from(admission.waited.as_millis()).unwrap_or(u64::MAX);

        if outcome.is_accepted() {
            info!(
                doc_id = %document.label(),
                status,
                waited_ms,
                "document submitted"
            );
        } else {
            warn!(
                doc_id = %document.label(),
                status,
                waited_ms,
                "document rejected by remote endpoint"
            );
        }

        Ok(outcome)
    }
}
