use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/users", post(handlers::create_user))
        .route("/groups", post(handlers::create_group))
        .route("/events", post(handlers::create_event))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
