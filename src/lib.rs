use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod data;
pub mod features;
pub mod handlers;
pub mod schema;
pub mod utils;

pub use data::repositories::DbPool;
use features::srs::Scheduler;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<Scheduler>,
}

impl AppState {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler: Arc::new(scheduler),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Card API router
    let cards_router = Router::new()
        .route("/", post(handlers::cards::create_card))
        .route("/{card_id}", get(handlers::cards::get_card))
        .route("/{card_id}/review", post(handlers::cards::review_card))
        .route("/{card_id}/content", get(handlers::cards::get_review_content));

    // Per-user queries
    let users_router = Router::new()
        .route("/{user_id}/due", get(handlers::users::due_cards))
        .route("/{user_id}/statistics", get(handlers::users::statistics))
        .route("/{user_id}/schedule", get(handlers::users::upcoming_schedule));

    let api_router = Router::new()
        .nest("/cards", cards_router)
        .nest("/users", users_router);

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
