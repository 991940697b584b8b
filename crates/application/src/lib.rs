//! Application services and ports.

#![forbid(unsafe_code)]

mod document_submission_service;
mod rate_gate;

pub use document_submission_service::{
    DocumentSerializer, DocumentSubmissionService, DocumentTransport, SubmissionOutcome,
};
pub use rate_gate::{Admission, Clock, RateGate, TokioClock};
