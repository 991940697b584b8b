//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_document_transport;
mod json_document_serializer;

pub use http_document_transport::{
    DEFAULT_SUBMISSION_ENDPOINT, HttpDocumentTransport, SIGNATURE_HEADER,
};
pub use json_document_serializer::JsonDocumentSerializer;
