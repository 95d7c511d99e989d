pub mod health;
pub mod profiles;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Organization profiles
        .route("/items/", get(profiles::list_profiles))
        .route("/items/", post(profiles::create_profile))
        .route("/items/:item_id", get(profiles::get_profile))
        .route("/items/:item_id", put(profiles::update_profile))
        .route("/items/:item_id", delete(profiles::delete_profile))
}
