//! Rate-limited document submitter runtime.

#![forbid(unsafe_code)]

mod document_source;
mod submitter_config;

use std::env;
use std::sync::Arc;

use crpt_application::{DocumentSubmissionService, RateGate, SubmissionOutcome};
use crpt_core::AppError;
use crpt_infrastructure::{HttpDocumentTransport, JsonDocumentSerializer};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::document_source::load_documents;
use crate::submitter_config::{SubmitterConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = SubmitterConfig::load()?;
    let documents = load_documents(env::args().skip(1))?;
    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let service = DocumentSubmissionService::new(
        Arc::new(RateGate::new(config.rate_limit)),
        Arc::new(JsonDocumentSerializer::new()),
        Arc::new(HttpDocumentTransport::new(http_client, config.endpoint.clone())),
    );

    info!(
        endpoint = %config.endpoint,
        window = %config.window_unit,
        limit = config.rate_limit.limit(),
        documents = documents.len(),
        "crpt-submitter started"
    );

    let mut submissions = JoinSet::new();
    for document in documents {
        let service = service.clone();
        let signature = config.signature.clone();
        submissions.spawn(async move {
            let outcome = service.submit(&document, signature.as_str()).await;
            (document.label().to_owned(), outcome)
        });
    }

    let mut accepted = 0_u32;
    let mut rejected = 0_u32;
    let mut failed = 0_u32;
    while let Some(joined) = submissions.join_next().await {
        match joined {
            Ok((_, Ok(SubmissionOutcome::Accepted { .. }))) => {
                accepted = accepted.saturating_add(1);
            }
            Ok((_, Ok(SubmissionOutcome::Rejected { .. }))) => {
                rejected = rejected.saturating_add(1);
            }
            Ok((doc_id, Err(error))) => {
                failed = failed.saturating_add(1);
                warn!(doc_id = %doc_id, error = %error, "document submission failed");
            }
            Err(error) => {
                failed = failed.saturating_add(1);
                warn!(error = %error, "document submission task aborted");
            }
        }
    }

    info!(accepted, rejected, failed, "crpt-submitter finished");

    if failed > 0 {
        return Err(AppError::Internal(format!("{failed} document submissions failed")));
    }

    Ok(())
}
