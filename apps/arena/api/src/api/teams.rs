use axum::Router;
use domain_teams::handlers;

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(state.teams.clone())
}
