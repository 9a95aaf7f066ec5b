use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{PlayerError, PlayerResult};
use crate::models::{
    AgeRangeQuery, AverageAgeResponse, CountResponse, EmailQuery, NameQuery, Player,
    PlayerRequest, SalaryQuery,
};
use crate::repository::PlayerRepository;
use crate::service::PlayerService;

pub const TAG: &str = "players";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_players,
        create_player,
        get_player,
        update_player,
        delete_player,
        search_by_email,
        search_by_team,
        search_by_position,
        search_by_age,
        search_by_name,
        search_by_salary,
        list_active,
        list_inactive,
        activate_player,
        deactivate_player,
        count_by_team,
        count_active,
        average_age_by_team,
    ),
    components(
        schemas(Player, PlayerRequest, CountResponse, AverageAgeResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Player registration and search"))
)]
pub struct ApiDoc;

pub fn router<R: PlayerRepository + 'static>(service: PlayerService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_players).post(create_player))
        .route(
            "/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
        .route("/{id}/activate", patch(activate_player))
        .route("/{id}/deactivate", patch(deactivate_player))
        .route("/search/email", get(search_by_email))
        .route("/search/team/{team_name}", get(search_by_team))
        .route("/search/position/{position}", get(search_by_position))
        .route("/search/age", get(search_by_age))
        .route("/search/name", get(search_by_name))
        .route("/search/salary", get(search_by_salary))
        .route("/active", get(list_active))
        .route("/inactive", get(list_inactive))
        .route("/count/team/{team_name}", get(count_by_team))
        .route("/count/active", get(count_active))
        .route("/stats/team/{team_name}/average-age", get(average_age_by_team))
        .with_state(shared_service)
}

#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All players", body = Vec<Player>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_players<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
) -> PlayerResult<Json<Vec<Player>>> {
    Ok(Json(service.get_all_players().await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = PlayerRequest,
    responses(
        (status = 201, description = "Player created", body = Player),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_player<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    ValidatedJson(input): ValidatedJson<PlayerRequest>,
) -> PlayerResult<impl IntoResponse> {
    let player = service.create_player(input.into()).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Player ID")),
    responses(
        (status = 200, description = "Player found", body = Player),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_player<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    IdPath(id): IdPath,
) -> PlayerResult<Json<Player>> {
    Ok(Json(service.get_player_by_id(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Player ID")),
    request_body = PlayerRequest,
    responses(
        (status = 200, description = "Player updated", body = Player),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_player<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<PlayerRequest>,
) -> PlayerResult<Json<Player>> {
    Ok(Json(service.update_player(id, input.into()).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Player ID")),
    responses(
        (status = 204, description = "Player deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_player<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    IdPath(id): IdPath,
) -> PlayerResult<StatusCode> {
    service.delete_player(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/search/email",
    tag = TAG,
    params(EmailQuery),
    responses(
        (status = 200, description = "Player with this email", body = Player),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn search_by_email<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    Query(query): Query<EmailQuery>,
) -> PlayerResult<Json<Player>> {
    service
        .get_player_by_email(&query.email)
        .await?
        .map(Json)
        .ok_or(PlayerError::EmailNotFound(query.email))
}

#[utoipa::path(
    get,
    path = "/search/team/{team_name}",
    tag = TAG,
    params(("team_name" = String, Path, description = "Team name")),
    responses(
        (status = 200, description = "Players on the team", body = Vec<Player>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn search_by_team<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    Path(team_name): Path<String>,
) -> PlayerResult<Json<Vec<Player>>> {
    Ok(Json(service.get_players_by_team(&team_name).await?))
}

#[utoipa::path(
    get,
    path = "/search/position/{position}",
    tag = TAG,
    params(("position" = String, Path, description = "Playing position, case-insensitive")),
    responses(
        (status = 200, description = "Players in the position", body = Vec<Player>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn search_by_position<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    Path(position): Path<String>,
) -> PlayerResult<Json<Vec<Player>>> {
    Ok(Json(service.get_players_by_position(&position).await?))
}

#[utoipa::path(
    get,
    path = "/search/age",
    tag = TAG,
    params(AgeRangeQuery),
    responses(
        (status = 200, description = "Players within the age range", body = Vec<Player>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn search_by_age<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    Query(range): Query<AgeRangeQuery>,
) -> PlayerResult<Json<Vec<Player>>> {
    Ok(Json(
        service
            .get_players_by_age_range(range.min_age, range.max_age)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/search/name",
    tag = TAG,
    params(NameQuery),
    responses(
        (status = 200, description = "Players whose full name matches", body = Vec<Player>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn search_by_name<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    Query(query): Query<NameQuery>,
) -> PlayerResult<Json<Vec<Player>>> {
    Ok(Json(service.find_players_by_full_name(&query.name).await?))
}

#[utoipa::path(
    get,
    path = "/search/salary",
    tag = TAG,
    params(SalaryQuery),
    responses(
        (status = 200, description = "Players earning more, highest first", body = Vec<Player>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn search_by_salary<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    Query(query): Query<SalaryQuery>,
) -> PlayerResult<Json<Vec<Player>>> {
    Ok(Json(
        service.get_players_with_salary_above(query.min_salary).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/active",
    tag = TAG,
    responses((status = 200, description = "Active players", body = Vec<Player>))
)]
async fn list_active<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
) -> PlayerResult<Json<Vec<Player>>> {
    Ok(Json(service.get_active_players().await?))
}

#[utoipa::path(
    get,
    path = "/inactive",
    tag = TAG,
    responses((status = 200, description = "Inactive players", body = Vec<Player>))
)]
async fn list_inactive<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
) -> PlayerResult<Json<Vec<Player>>> {
    Ok(Json(service.get_inactive_players().await?))
}

#[utoipa::path(
    patch,
    path = "/{id}/activate",
    tag = TAG,
    params(("id" = i64, Path, description = "Player ID")),
    responses(
        (status = 200, description = "Player activated", body = Player),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn activate_player<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    IdPath(id): IdPath,
) -> PlayerResult<Json<Player>> {
    Ok(Json(service.activate_player(id).await?))
}

#[utoipa::path(
    patch,
    path = "/{id}/deactivate",
    tag = TAG,
    params(("id" = i64, Path, description = "Player ID")),
    responses(
        (status = 200, description = "Player deactivated", body = Player),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn deactivate_player<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    IdPath(id): IdPath,
) -> PlayerResult<Json<Player>> {
    Ok(Json(service.deactivate_player(id).await?))
}

#[utoipa::path(
    get,
    path = "/count/team/{team_name}",
    tag = TAG,
    params(("team_name" = String, Path, description = "Team name")),
    responses(
        (status = 200, description = "Number of players on the team", body = CountResponse),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn count_by_team<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    Path(team_name): Path<String>,
) -> PlayerResult<Json<CountResponse>> {
    let count = service.count_players_by_team(&team_name).await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/count/active",
    tag = TAG,
    responses((status = 200, description = "Number of active players", body = CountResponse))
)]
async fn count_active<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
) -> PlayerResult<Json<CountResponse>> {
    let count = service.count_active_players().await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/stats/team/{team_name}/average-age",
    tag = TAG,
    params(("team_name" = String, Path, description = "Team name")),
    responses(
        (status = 200, description = "Average age, 0 for an empty team", body = AverageAgeResponse),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn average_age_by_team<R: PlayerRepository>(
    State(service): State<Arc<PlayerService<R>>>,
    Path(team_name): Path<String>,
) -> PlayerResult<Json<AverageAgeResponse>> {
    let average_age = service.calculate_average_age_by_team(&team_name).await?;
    Ok(Json(AverageAgeResponse {
        team_name: team_name.trim().to_string(),
        average_age,
    }))
}
