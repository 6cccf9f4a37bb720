use storage::{
    Document, DocumentStore,
    dto::pitch::PitchFilter,
    error::Result,
    models::{Pitch, StoredPitch},
    repository::pitch::PitchRepository,
};
use uuid::Uuid;

/// List pitches matching the filter
pub async fn list_pitches(
    store: &dyn DocumentStore,
    filter: &PitchFilter,
) -> Result<(Vec<StoredPitch>, u64)> {
    let repo = PitchRepository::new(store);
    repo.list(filter).await
}

/// Get pitch by id
pub async fn get_pitch(store: &dyn DocumentStore, id: Uuid) -> Result<StoredPitch> {
    let repo = PitchRepository::new(store);
    repo.find_by_id(id).await
}

/// Validate a submitted document and store it as a new pitch
pub async fn create_pitch(store: &dyn DocumentStore, document: &Document) -> Result<StoredPitch> {
    let pitch = Pitch::from_document(document)?;

    let repo = PitchRepository::new(store);
    let created = repo.create(&pitch).await?;
    tracing::info!(pitch_id = %created.id, created_by = %pitch.created_by(), "Pitch registered");

    Ok(created)
}

/// Apply a partial update to a pitch
pub async fn update_pitch(
    store: &dyn DocumentStore,
    id: Uuid,
    patch: &Document,
) -> Result<StoredPitch> {
    let repo = PitchRepository::new(store);
    repo.update(id, patch).await
}

/// Mark a pitch as verified
pub async fn verify_pitch(store: &dyn DocumentStore, id: Uuid) -> Result<StoredPitch> {
    let repo = PitchRepository::new(store);
    let verified = repo.set_verified(id, true).await?;
    tracing::info!(pitch_id = %id, "Pitch verified");

    Ok(verified)
}

/// Delete a pitch
pub async fn delete_pitch(store: &dyn DocumentStore, id: Uuid) -> Result<()> {
    let repo = PitchRepository::new(store);
    repo.delete(id).await
}
