use axum::{
    Json,
    response::{IntoResponse, Response},
};
use storage::dto::navigation::NavigationCard;
use validator::Validate;

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = 200, description = "Home menu cards", body = Vec<NavigationCard>)
    ),
    tag = "navigation"
)]
pub async fn get_navigation() -> WebResult<Response> {
    let cards = services::home_menu();
    for card in &cards {
        card.validate()?;
    }

    Ok(Json(cards).into_response())
}
