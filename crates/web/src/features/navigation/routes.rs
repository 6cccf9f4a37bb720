use axum::{Router, routing::get};

use super::handlers::get_navigation;
use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_navigation))
}
