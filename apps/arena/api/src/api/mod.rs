use axum::Router;

pub mod events;
pub mod health;
pub mod players;
pub mod teams;

/// API routes without the `/api` prefix; `create_router` adds it.
///
/// Every sub-router already has its state applied.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/events", events::router(state))
        .nest("/teams", teams::router(state))
        .nest("/players", players::router(state))
}

/// `/ready`, merged next to the stateless app router.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
