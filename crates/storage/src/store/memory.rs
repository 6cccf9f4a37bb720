use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, Page, StoredDocument};
use crate::error::{Result, StorageError};

/// Process-local [`DocumentStore`]. Data lives as long as the value does.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: &str, data: Document) -> Result<StoredDocument> {
        let now = Utc::now();
        let document = StoredDocument {
            id: Uuid::new_v4(),
            data,
            created_at: now,
            updated_at: now,
        };

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<StoredDocument> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|d| d.id == id))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list(
        &self,
        collection: &str,
        filter: &Document,
        page: Page,
    ) -> Result<Vec<StoredDocument>> {
        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);

        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|d| d.matches(filter))
                    .skip(offset)
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count(&self, collection: &str, filter: &Document) -> Result<u64> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|documents| documents.iter().filter(|d| d.matches(filter)).count() as u64)
            .unwrap_or_default())
    }

    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        data: Document,
    ) -> Result<StoredDocument> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|d| d.id == id))
            .ok_or(StorageError::NotFound)?;

        document.data = data;
        document.updated_at = Utc::now().max(document.updated_at);

        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<()> {
        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or(StorageError::NotFound)?;

        let position = documents
            .iter()
            .position(|d| d.id == id)
            .ok_or(StorageError::NotFound)?;
        documents.remove(position);

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
