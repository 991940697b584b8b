//! Goods introduction document carried to the submission endpoint.
//!
//! Field contents are passed through unchanged; only the wire shape is fixed here.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Kind of goods introduction document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocType {
    /// Goods introduction entered through the direct form.
    #[serde(rename = "LP_INTRODUCE_GOODS")]
    IntroduceGoods,
    /// Goods introduction uploaded as CSV.
    #[serde(rename = "LP_INTRODUCE_GOODS_CSV")]
    IntroduceGoodsCsv,
    /// Goods introduction uploaded as XML.
    #[serde(rename = "LP_INTRODUCE_GOODS_XML")]
    IntroduceGoodsXml,
}

impl DocType {
    /// Returns stable wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IntroduceGoods => "LP_INTRODUCE_GOODS",
            Self::IntroduceGoodsCsv => "LP_INTRODUCE_GOODS_CSV",
            Self::IntroduceGoodsXml => "LP_INTRODUCE_GOODS_XML",
        }
    }
}

/// Document description block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    /// Tax identifier of the participant.
    pub participant_inn: Option<String>,
}

/// One product line of a goods introduction document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Conformity certificate kind.
    pub certificate_document: Option<String>,
    /// Conformity certificate date.
    pub certificate_document_date: Option<NaiveDateTime>,
    /// Conformity certificate number.
    pub certificate_document_number: Option<String>,
    /// Tax identifier of the owner.
    pub owner_inn: Option<String>,
    /// Tax identifier of the producer.
    pub producer_inn: Option<String>,
    /// Production date of the product.
    pub production_date: Option<NaiveDateTime>,
    /// Commodity nomenclature code.
    #[serde(rename = "tnvedCode")]
    pub tnved_code: Option<String>,
    /// Unit identification code.
    #[serde(rename = "uitCode")]
    pub uit_code: Option<String>,
    /// Transport package identification code.
    #[serde(rename = "uituCode")]
    pub uitu_code: Option<String>,
}

/// Goods introduction document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentGoods {
    /// Description block.
    pub description: Option<Description>,
    /// Document identifier.
    pub doc_id: Option<String>,
    /// Document status.
    pub doc_status: Option<String>,
    /// Document kind.
    pub doc_type: Option<DocType>,
    /// Whether the goods are imported.
    pub import_request: bool,
    /// Tax identifier of the owner.
    pub owner_inn: Option<String>,
    /// Tax identifier of the participant.
    pub participant_inn: Option<String>,
    /// Tax identifier of the producer.
    pub producer_inn: Option<String>,
    /// Production date and time.
    pub production_date: Option<NaiveDateTime>,
    /// Production type.
    pub production_type: Option<String>,
    /// Ordered product lines.
    pub products: Vec<Product>,
    /// Registration date and time.
    pub reg_date: Option<NaiveDateTime>,
    /// Registration number.
    pub reg_number: Option<String>,
}

impl DocumentGoods {
    /// Creates a minimal document with only an identifier and a kind.
    #[must_use]
    pub fn new(doc_id: impl Into<String>, doc_type: DocType) -> Self {
        Self {
            doc_id: Some(doc_id.into()),
            doc_type: Some(doc_type),
            ..Self::default()
        }
    }

    /// Returns a short identifier suitable for log fields.
    #[must_use]
    pub fn label(&self) -> &str {
        self.doc_id
            .as_deref()
            .or(self.reg_number.as_deref())
            .unwrap_or("<unidentified>")
    }
}
