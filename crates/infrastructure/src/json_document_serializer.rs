use crpt_application::DocumentSerializer;
use crpt_core::{AppError, AppResult};
use crpt_domain::DocumentGoods;

/// JSON implementation of the document serializer port.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentSerializer;

impl JsonDocumentSerializer {
    /// Creates a new JSON serializer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSerializer for JsonDocumentSerializer {
    fn serialize(&self, document: &DocumentGoods) -> AppResult<String> {
        serde_json::to_string(document).map_err(|error| {
            AppError::Serialization(format!(
                "failed to encode document '{}': {error}",
                document.label()
            ))
        })
    }
}
