pub mod admin;
pub mod rsvps;

use axum::Router;

use crate::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new().merge(rsvps::router()).merge(admin::router())
}
