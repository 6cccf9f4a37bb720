use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_pitch, delete_pitch, get_pitch, list_pitches, update_pitch, verify_pitch,
};
use crate::app::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_pitch))
        .route("/:id", put(update_pitch))
        .route("/:id", delete(delete_pitch))
        .route("/:id/verify", post(verify_pitch))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_pitches))
        .route("/:id", get(get_pitch))
        .merge(protected)
}
