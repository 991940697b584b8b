use std::fs;

use crpt_core::{AppError, AppResult};
use crpt_domain::{DocType, DocumentGoods};
use serde::Deserialize;

/// A document file holds either one document or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentFile {
    Many(Vec<DocumentGoods>),
    One(DocumentGoods),
}

/// Reads every document from the given files, in argument order.
///
/// Without any file the minimal sample document is returned.
pub fn load_documents(paths: impl IntoIterator<Item = String>) -> AppResult<Vec<DocumentGoods>> {
    let mut documents = Vec::new();
    let mut saw_path = false;

    for path in paths {
        saw_path = true;
        let contents = fs::read_to_string(path.as_str()).map_err(|error| {
            AppError::Configuration(format!("failed to read document file '{path}': {error}"))
        })?;
        documents.extend(parse_documents(contents.as_str()).map_err(|error| {
            AppError::Serialization(format!("invalid document file '{path}': {error}"))
        })?);
    }

    if !saw_path {
        documents.push(DocumentGoods::new("12", DocType::IntroduceGoods));
    }

    Ok(documents)
}

fn parse_documents(contents: &str) -> Result<Vec<DocumentGoods>, serde_json::Error> {
    Ok(match serde_json::from_str::<DocumentFile>(contents)? {
        DocumentFile::Many(documents) => documents,
        DocumentFile::One(document) => vec![document],
    })
}
