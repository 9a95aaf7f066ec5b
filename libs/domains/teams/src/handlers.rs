use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use domain_players::PlayerRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TeamResult;
use crate::models::{Team, TeamCount, TeamRequest};
use crate::repository::TeamRepository;
use crate::service::TeamService;

pub const TAG: &str = "teams";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_teams,
        create_team,
        get_team,
        update_team,
        delete_team,
        teams_by_region,
        active_teams,
        count_teams,
    ),
    components(
        schemas(Team, TeamRequest, TeamCount),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Teams and their rosters"))
)]
pub struct ApiDoc;

type SharedService<R, P> = Arc<TeamService<R, P>>;

/// Takes the service already shared so the event handlers can resolve team
/// ids through the same instance.
pub fn router<R, P>(service: SharedService<R, P>) -> Router
where
    R: TeamRepository + 'static,
    P: PlayerRepository + 'static,
{
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/{id}", get(get_team).put(update_team).delete(delete_team))
        .route("/region/{region}", get(teams_by_region))
        .route("/active", get(active_teams))
        .route("/count", get(count_teams))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All teams with rosters", body = Vec<Team>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_teams<R: TeamRepository, P: PlayerRepository>(
    State(service): State<SharedService<R, P>>,
) -> TeamResult<Json<Vec<Team>>> {
    Ok(Json(service.get_all_teams().await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = TeamRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_team<R: TeamRepository, P: PlayerRepository>(
    State(service): State<SharedService<R, P>>,
    ValidatedJson(input): ValidatedJson<TeamRequest>,
) -> TeamResult<impl IntoResponse> {
    let team = service.create_team(input.into()).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team found", body = Team),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_team<R: TeamRepository, P: PlayerRepository>(
    State(service): State<SharedService<R, P>>,
    IdPath(id): IdPath,
) -> TeamResult<Json<Team>> {
    Ok(Json(service.get_team_by_id(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Team ID")),
    request_body = TeamRequest,
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_team<R: TeamRepository, P: PlayerRepository>(
    State(service): State<SharedService<R, P>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<TeamRequest>,
) -> TeamResult<Json<Team>> {
    Ok(Json(service.update_team(id, input.into()).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_team<R: TeamRepository, P: PlayerRepository>(
    State(service): State<SharedService<R, P>>,
    IdPath(id): IdPath,
) -> TeamResult<StatusCode> {
    service.delete_team(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/region/{region}",
    tag = TAG,
    params(("region" = String, Path, description = "Region code")),
    responses((status = 200, description = "Teams in the region", body = Vec<Team>))
)]
async fn teams_by_region<R: TeamRepository, P: PlayerRepository>(
    State(service): State<SharedService<R, P>>,
    Path(region): Path<String>,
) -> TeamResult<Json<Vec<Team>>> {
    Ok(Json(service.get_teams_by_region(&region).await?))
}

#[utoipa::path(
    get,
    path = "/active",
    tag = TAG,
    responses((status = 200, description = "Active teams", body = Vec<Team>))
)]
async fn active_teams<R: TeamRepository, P: PlayerRepository>(
    State(service): State<SharedService<R, P>>,
) -> TeamResult<Json<Vec<Team>>> {
    Ok(Json(service.get_active_teams().await?))
}

#[utoipa::path(
    get,
    path = "/count",
    tag = TAG,
    responses((status = 200, description = "Number of teams", body = TeamCount))
)]
async fn count_teams<R: TeamRepository, P: PlayerRepository>(
    State(service): State<SharedService<R, P>>,
) -> TeamResult<Json<TeamCount>> {
    let count = service.count_teams().await?;
    Ok(Json(TeamCount { count }))
}
