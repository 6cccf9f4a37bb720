use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Document,
    dto::{
        common::PaginatedResponse,
        pitch::{PitchFilter, PitchResponse},
    },
    models::NewPitch,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/pitches",
    params(PitchFilter),
    responses(
        (status = 200, description = "List pitches successfully", body = PaginatedResponse<PitchResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "pitches"
)]
pub async fn list_pitches(
    State(state): State<AppState>,
    query: Result<Query<PitchFilter>, QueryRejection>,
) -> WebResult<Response> {
    let Query(filter) = query?;
    filter.validate()?;

    let (pitches, total_items) = services::list_pitches(state.store(), &filter).await?;

    let response = PaginatedResponse::new(
        pitches.into_iter().map(PitchResponse::from).collect(),
        filter.page,
        filter.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/pitches/{id}",
    params(
        ("id" = Uuid, Path, description = "Pitch id")
    ),
    responses(
        (status = 200, description = "Pitch found", body = PitchResponse),
        (status = 404, description = "Pitch not found")
    ),
    tag = "pitches"
)]
pub async fn get_pitch(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> WebResult<Response> {
    let Path(id) = id?;
    let pitch = services::get_pitch(state.store(), id).await?;

    Ok(Json(PitchResponse::from(pitch)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/pitches",
    request_body = NewPitch,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Pitch created successfully", body = PitchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "pitches"
)]
pub async fn create_pitch(
    State(state): State<AppState>,
    payload: Result<Json<Document>, JsonRejection>,
) -> WebResult<Response> {
    let Json(document) = payload?;

    let pitch = services::create_pitch(state.store(), &document).await?;

    Ok((StatusCode::CREATED, Json(PitchResponse::from(pitch))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/pitches/{id}",
    params(
        ("id" = Uuid, Path, description = "Pitch id")
    ),
    request_body = NewPitch,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pitch updated successfully", body = PitchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pitch not found")
    ),
    tag = "pitches"
)]
pub async fn update_pitch(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<Document>, JsonRejection>,
) -> WebResult<Response> {
    let Path(id) = id?;
    let Json(patch) = payload?;

    let updated = services::update_pitch(state.store(), id, &patch).await?;

    Ok(Json(PitchResponse::from(updated)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/pitches/{id}/verify",
    params(
        ("id" = Uuid, Path, description = "Pitch id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pitch verified", body = PitchResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pitch not found")
    ),
    tag = "pitches"
)]
pub async fn verify_pitch(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> WebResult<Response> {
    let Path(id) = id?;
    let verified = services::verify_pitch(state.store(), id).await?;

    Ok(Json(PitchResponse::from(verified)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/pitches/{id}",
    params(
        ("id" = Uuid, Path, description = "Pitch id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Pitch deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pitch not found")
    ),
    tag = "pitches"
)]
pub async fn delete_pitch(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> WebResult<Response> {
    let Path(id) = id?;
    services::delete_pitch(state.store(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
