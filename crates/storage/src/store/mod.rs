//! Document-store port.
//!
//! Records are flat JSON objects grouped into named collections. The store
//! owns identity and time: it assigns each document's id and stamps
//! `created_at`/`updated_at` with its own clock on every write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;

mod memory;

pub use memory::InMemoryDocumentStore;

/// A flat record as handed to or returned by a [`DocumentStore`].
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub data: Document,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    /// True if every top-level key in `filter` holds an equal value in the
    /// document.
    pub fn matches(&self, filter: &Document) -> bool {
        filter
            .iter()
            .all(|(key, expected)| self.data.get(key) == Some(expected))
    }
}

/// Window over a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    pub const ALL: Page = Page {
        offset: 0,
        limit: u64::MAX,
    };

    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores a new document and returns it with its assigned id and
    /// timestamps.
    async fn insert(&self, collection: &str, data: Document) -> Result<StoredDocument>;

    async fn get(&self, collection: &str, id: Uuid) -> Result<StoredDocument>;

    /// One page of the documents matching `filter` (see
    /// [`StoredDocument::matches`]) in creation order. An empty filter
    /// matches everything.
    async fn list(
        &self,
        collection: &str,
        filter: &Document,
        page: Page,
    ) -> Result<Vec<StoredDocument>>;

    /// Number of documents matching `filter`.
    async fn count(&self, collection: &str, filter: &Document) -> Result<u64>;

    /// Overwrites a document's data, keeping `created_at` and restamping
    /// `updated_at`.
    async fn replace(&self, collection: &str, id: Uuid, data: Document)
    -> Result<StoredDocument>;

    async fn delete(&self, collection: &str, id: Uuid) -> Result<()>;

    /// Readiness check.
    async fn ping(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matches_requires_every_filter_key() {
        let now = Utc::now();
        let document = StoredDocument {
            id: Uuid::new_v4(),
            data: json!({ "teamId": "t1", "isVerified": true })
                .as_object()
                .cloned()
                .unwrap(),
            created_at: now,
            updated_at: now,
        };

        let mut filter = Document::new();
        assert!(document.matches(&filter));

        filter.insert("teamId".into(), json!("t1"));
        assert!(document.matches(&filter));

        filter.insert("isVerified".into(), json!(false));
        assert!(!document.matches(&filter));

        let mut absent = Document::new();
        absent.insert("createdBy".into(), json!("u1"));
        assert!(!document.matches(&absent));
    }
}
