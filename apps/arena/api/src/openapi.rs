use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "Arena API",
        version = "0.1.0",
        description = "Players, teams and the events they meet in"
    ),
    servers((url = "/api", description = "API base path")),
    nest(
        (path = "/events", api = domain_events::handlers::ApiDoc),
        (path = "/teams", api = domain_teams::handlers::ApiDoc),
        (path = "/players", api = domain_players::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
