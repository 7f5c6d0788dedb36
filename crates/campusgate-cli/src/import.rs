//! Bulk import of a JSON array file into one collection.

use anyhow::{Context, bail};
use campusgate_store::{Collection, Document, DocumentStore};
use serde_json::Value;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub collection: Collection,
    pub written: usize,
    pub unprocessed: usize,
}

/// Parses a JSON array of objects.
pub fn parse_documents(raw: &str) -> anyhow::Result<Vec<Document>> {
    let value: Value = serde_json::from_str(raw).context("file is not valid JSON")?;
    let Value::Array(items) = value else {
        bail!("expected a JSON array of documents");
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(doc) => Ok(doc),
            other => bail!("element {i} is not an object: {other}"),
        })
        .collect()
}

pub async fn import_file(
    store: &dyn DocumentStore,
    collection: Collection,
    path: &Path,
) -> anyhow::Result<ImportReport> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let documents = parse_documents(&raw)?;
    let total = documents.len();

    let outcome = store.batch_put(collection, documents).await?;
    info!(
        collection = %collection,
        total,
        written = outcome.written,
        unprocessed = outcome.unprocessed.len(),
        "Import finished"
    );

    Ok(ImportReport {
        collection,
        written: outcome.written,
        unprocessed: outcome.unprocessed.len(),
    })
}
