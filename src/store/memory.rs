//! In-memory document store
//!
//! Implements both collaborator contracts over named collections of
//! documents. Useful for tests and for embedding small data sets.

use super::compare::compare_values;
use super::matcher::matches_all;
use super::projection::project;
use super::{Counter, FetchQuery, Fetcher};
use crate::error::{Error, Result};
use crate::query::SortKey;
use crate::record::lookup_path;
use crate::types::{Collation, SortDirection};
use async_trait::async_trait;
use bson::{Bson, Document};
use serde::de::DeserializeOwned;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

static NULL: Bson = Bson::Null;

/// Named collections of documents held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add documents to a collection while building the store
    pub fn with_collection(
        mut self,
        collection: impl Into<String>,
        documents: impl IntoIterator<Item = Document>,
    ) -> Self {
        self.collections
            .get_mut()
            .entry(collection.into())
            .or_default()
            .extend(documents);
        self
    }

    /// Insert a document
    pub async fn insert(&self, collection: &str, document: Document) {
        self.insert_many(collection, [document]).await;
    }

    /// Insert several documents
    pub async fn insert_many(&self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
    }

    /// Remove documents matching `filter`, returning how many were removed
    pub async fn delete_many(&self, collection: &str, filter: &Document) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let mut kept = Vec::with_capacity(documents.len());
        let mut removed = 0;
        for document in documents.drain(..) {
            if matches_all(&document, std::slice::from_ref(filter), None)? {
                removed += 1;
            } else {
                kept.push(document);
            }
        }
        *documents = kept;
        Ok(removed)
    }

    /// Number of documents in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Check if a collection is empty or missing
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }

    async fn select(
        &self,
        collection: &str,
        filters: &[Document],
        collation: Option<&Collation>,
    ) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut selected = Vec::new();
        for document in documents {
            if matches_all(document, filters, collation)? {
                selected.push(document.clone());
            }
        }
        Ok(selected)
    }
}

#[async_trait]
impl Counter for MemoryStore {
    async fn count(&self, collection: &str, filters: &[Document]) -> Result<u64> {
        let selected = self.select(collection, filters, None).await?;
        Ok(selected.len() as u64)
    }
}

#[async_trait]
impl<R> Fetcher<R> for MemoryStore
where
    R: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<R>> {
        let collation = query.collation.as_ref();
        let mut documents = self
            .select(&query.collection, &query.filters, collation)
            .await?;
        documents.sort_by(|a, b| compare_by_keys(a, b, &query.sort, collation));

        tracing::trace!(
            collection = %query.collection,
            matched = documents.len(),
            limit = query.limit,
            "memory fetch"
        );

        documents
            .into_iter()
            .take(query.limit)
            .map(|document| {
                let document = match &query.projection {
                    Some(projection) => project(document, projection)?,
                    None => document,
                };
                bson::from_document(document)
                    .map_err(|e| Error::store(format!("failed to decode document: {e}")))
            })
            .collect()
    }
}

fn compare_by_keys(
    a: &Document,
    b: &Document,
    keys: &[SortKey],
    collation: Option<&Collation>,
) -> Ordering {
    for key in keys {
        let value_a = lookup_path(a, &key.field).unwrap_or(&NULL);
        let value_b = lookup_path(b, &key.field).unwrap_or(&NULL);
        let ord = compare_values(value_a, value_b, collation);
        let ord = match key.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
