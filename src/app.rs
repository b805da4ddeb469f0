use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/day/:date", get(handlers::get_day))
        .route("/api/week", get(handlers::get_week))
        .route("/api/value", post(handlers::set_value))
        .route("/api/config", put(handlers::put_config))
        .route("/heartbeat", post(handlers::heartbeat))
        .with_state(state)
}
