use serde_json::Value;
use uuid::Uuid;

use crate::dto::pitch::PitchFilter;
use crate::error::Result;
use crate::models::{PITCHES_COLLECTION, Pitch, StoredPitch};
use crate::store::{Document, DocumentStore, Page};

/// Repository for pitch documents
pub struct PitchRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> PitchRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Persist a new pitch. The store assigns id and timestamps.
    pub async fn create(&self, pitch: &Pitch) -> Result<StoredPitch> {
        let stored = self
            .store
            .insert(PITCHES_COLLECTION, pitch.to_storage_record())
            .await?;
        tracing::debug!(pitch_id = %stored.id, "Pitch created");

        StoredPitch::try_from(stored)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<StoredPitch> {
        let stored = self.store.get(PITCHES_COLLECTION, id).await?;
        StoredPitch::try_from(stored)
    }

    /// List pitches matching the filter, returning one page and the total
    /// number of matches.
    pub async fn list(&self, filter: &PitchFilter) -> Result<(Vec<StoredPitch>, u64)> {
        let document_filter = filter.to_document_filter();
        let total_items = self
            .store
            .count(PITCHES_COLLECTION, &document_filter)
            .await?;

        let page = Page::new(filter.offset() as u64, filter.limit() as u64);
        let pitches = self
            .store
            .list(PITCHES_COLLECTION, &document_filter, page)
            .await?
            .into_iter()
            .map(StoredPitch::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((pitches, total_items))
    }

    /// Merge `patch` over the current record and store the result.
    ///
    /// The merged record is validated as a whole; on failure nothing is
    /// written.
    pub async fn update(&self, id: Uuid, patch: &Document) -> Result<StoredPitch> {
        let current = self.find_by_id(id).await?;

        let mut record = current.pitch.to_storage_record();
        for (key, value) in patch {
            record.insert(key.clone(), value.clone());
        }
        let pitch = Pitch::from_document(&record)?;

        let stored = self
            .store
            .replace(PITCHES_COLLECTION, id, pitch.to_storage_record())
            .await?;
        tracing::debug!(pitch_id = %id, "Pitch updated");

        StoredPitch::try_from(stored)
    }

    pub async fn set_verified(&self, id: Uuid, verified: bool) -> Result<StoredPitch> {
        let mut patch = Document::new();
        patch.insert("isVerified".to_string(), Value::Bool(verified));
        self.update(id, &patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete(PITCHES_COLLECTION, id).await?;
        tracing::debug!(pitch_id = %id, "Pitch deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PitchValidationError, StorageError};
    use crate::models::NewPitch;
    use crate::store::InMemoryDocumentStore;
    use serde_json::json;

    fn pitch(name: &str, team_id: Option<&str>) -> Pitch {
        Pitch::new(NewPitch {
            team_id: team_id.map(String::from),
            ..NewPitch::new(name, "user123")
        })
        .unwrap()
    }

    fn patch(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn filter() -> PitchFilter {
        PitchFilter::default()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryDocumentStore::new();
        let repo = PitchRepository::new(&store);

        let created = repo.create(&pitch("Sportpark Nord", None)).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap();

        assert_eq!(found, created);
        assert_eq!(found.pitch.name(), "Sportpark Nord");
        assert_eq!(found.created_at, found.updated_at);
    }

    #[tokio::test]
    async fn test_stored_record_has_no_timestamps() {
        let store = InMemoryDocumentStore::new();
        let repo = PitchRepository::new(&store);

        let created = repo.create(&pitch("Sportpark Nord", None)).await.unwrap();
        let raw = store.get(PITCHES_COLLECTION, created.id).await.unwrap();

        assert_eq!(raw.data.len(), 8);
        assert!(!raw.data.contains_key("createdAt"));
        assert!(!raw.data.contains_key("updatedAt"));
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let store = InMemoryDocumentStore::new();
        let repo = PitchRepository::new(&store);
        for i in 0..5 {
            repo.create(&pitch(&format!("A{i}"), Some("team-a")))
                .await
                .unwrap();
        }
        repo.create(&pitch("B", Some("team-b"))).await.unwrap();

        let (all, total) = repo.list(&filter()).await.unwrap();
        assert_eq!(total, 6);
        assert_eq!(all.len(), 6);

        let team_a = PitchFilter {
            team_id: Some("team-a".into()),
            page: 2,
            page_size: 2,
            ..filter()
        };
        let (page, total) = repo.list(&team_a).await.unwrap();
        assert_eq!(total, 5);
        let names: Vec<&str> = page.iter().map(|p| p.pitch.name()).collect();
        assert_eq!(names, vec!["A2", "A3"]);
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let store = InMemoryDocumentStore::new();
        let repo = PitchRepository::new(&store);
        let created = repo.create(&pitch("Sportpark Nord", None)).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &patch(json!({ "notes": "floodlights", "teamId": "team-9" })),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.pitch.name(), "Sportpark Nord");
        assert_eq!(updated.pitch.notes(), "floodlights");
        assert_eq!(updated.pitch.team_id(), Some("team-9"));
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_document_untouched() {
        let store = InMemoryDocumentStore::new();
        let repo = PitchRepository::new(&store);
        let created = repo.create(&pitch("Sportpark Nord", None)).await.unwrap();

        let err = repo
            .update(created.id, &patch(json!({ "isVerified": "yes" })))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Validation(PitchValidationError::InvalidType {
                field: "isVerified",
                ..
            })
        ));

        let err = repo
            .update(created.id, &patch(json!({ "name": "" })))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Validation(PitchValidationError::MissingRequiredField("name"))
        ));

        assert_eq!(repo.find_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_set_verified() {
        let store = InMemoryDocumentStore::new();
        let repo = PitchRepository::new(&store);
        let created = repo.create(&pitch("Sportpark Nord", None)).await.unwrap();
        assert!(!created.pitch.is_verified());

        let verified = repo.set_verified(created.id, true).await.unwrap();
        assert!(verified.pitch.is_verified());

        let only_verified = PitchFilter {
            is_verified: Some(true),
            ..filter()
        };
        let (pitches, total) = repo.list(&only_verified).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(pitches[0].id, created.id);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryDocumentStore::new();
        let repo = PitchRepository::new(&store);
        let created = repo.create(&pitch("Sportpark Nord", None)).await.unwrap();

        repo.delete(created.id).await.unwrap();

        assert!(matches!(
            repo.find_by_id(created.id).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            repo.delete(created.id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_corrupt_document_surfaces_on_read() {
        let store = InMemoryDocumentStore::new();
        let stored = store
            .insert(PITCHES_COLLECTION, patch(json!({ "name": "orphan" })))
            .await
            .unwrap();
        let repo = PitchRepository::new(&store);

        assert!(matches!(
            repo.find_by_id(stored.id).await,
            Err(StorageError::CorruptDocument { .. })
        ));
    }
}
