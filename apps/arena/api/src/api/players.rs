use axum::Router;
use domain_players::{PlayerService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(PlayerService::from_arc(state.players.clone()))
}
