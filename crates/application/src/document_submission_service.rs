//! Rate-limited document submission.
//!
//! The service takes one admission from the shared [`RateGate`](crate::RateGate)
//! per attempt, then serializes the document and hands it to the transport.
//! Serialization and network I/O run outside the gate's lock.

mod ports;
mod service;

#[cfg(test)]
mod tests;

pub use ports::{DocumentSerializer, DocumentTransport, SubmissionOutcome};
pub use service::DocumentSubmissionService;
