use axum::Router;
use domain_events::handlers;

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(state.events.clone(), state.teams.clone())
}
