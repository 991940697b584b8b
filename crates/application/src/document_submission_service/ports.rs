use async_trait::async_trait;
use crpt_core::AppResult;
use crpt_domain::DocumentGoods;

/// Port that encodes a document into the textual request payload.
pub trait DocumentSerializer: Send + Sync {
    /// Serializes the document. Fails with `AppError::Serialization`.
    fn serialize(&self, document: &DocumentGoods) -> AppResult<String>;
}

/// Port that delivers a serialized document to the remote endpoint.
#[async_trait]
pub trait DocumentTransport: Send + Sync {
    /// Sends the payload with its signature and returns the HTTP status code.
    ///
    /// Fails with `AppError::Transport` when the request could not be performed.
    async fn send(&self, payload: &str, signature: &str) -> AppResult<u16>;
}

/// Result of one submission attempt that reached the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Endpoint answered with a 2xx status.
    Accepted {
        /// Response status code.
        status: u16,
    },
    /// Endpoint answered with a non-2xx status.
    Rejected {
        /// Response status code.
        status: u16,
    },
}

impl SubmissionOutcome {
    /// Classifies a response status code.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        if (200..=299).contains(&status) {
            Self::Accepted { status }
        } else {
            Self::Rejected { status }
        }
    }

    /// Returns the response status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Accepted { status } | Self::Rejected { status } => *status,
        }
    }

    /// Returns whether the endpoint accepted the document.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
