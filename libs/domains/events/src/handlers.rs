use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, BusinessRuleResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EventResult;
use crate::models::{ArchiveResponse, Event, EventRequest, TeaserResponse};
use crate::repository::EventRepository;
use crate::service::{EventService, validate_event_request};
use crate::team_lookup::TeamLookup;

pub const TAG: &str = "events";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        create_event,
        get_event,
        update_event,
        delete_event,
        upcoming_events,
        past_events,
        active_events,
        todays_events,
        cancel_event,
        archive_events,
        event_teaser,
    ),
    components(
        schemas(Event, EventRequest, TeaserResponse, ArchiveResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            BusinessRuleResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Event lifecycle: scheduling, cancellation, archival"))
)]
pub struct ApiDoc;

/// Router state: the event service plus a way to turn team ids into teams
pub struct EventsState<R: EventRepository> {
    service: Arc<EventService<R>>,
    teams: Arc<dyn TeamLookup>,
}

impl<R: EventRepository> Clone for EventsState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            teams: Arc::clone(&self.teams),
        }
    }
}

impl<R: EventRepository> EventsState<R> {
    /// Team ids are looked up only after the request passes the event rules.
    async fn to_event(&self, request: EventRequest) -> EventResult<Event> {
        validate_event_request(&request)?;
        let team_a = self.teams.resolve(request.team_a_id).await?;
        let team_b = self.teams.resolve(request.team_b_id).await?;
        Ok(request.into_event(team_a, team_b))
    }
}

pub fn router<R: EventRepository + 'static>(
    service: Arc<EventService<R>>,
    teams: Arc<dyn TeamLookup>,
) -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/upcoming", get(upcoming_events))
        .route("/past", get(past_events))
        .route("/active", get(active_events))
        .route("/today", get(todays_events))
        .route("/archive", post(archive_events))
        .route("/{id}/cancel", post(cancel_event))
        .route("/{id}/teaser", get(event_teaser))
        .with_state(EventsState { service, teams })
}

#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All events", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
) -> EventResult<Json<Vec<Event>>> {
    Ok(Json(state.service.get_all_events().await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    ValidatedJson(request): ValidatedJson<EventRequest>,
) -> EventResult<impl IntoResponse> {
    let event = state.to_event(request).await?;
    let created = state.service.create_event(event).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    IdPath(id): IdPath,
) -> EventResult<Json<Event>> {
    Ok(Json(state.service.get_event_by_id(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Event ID")),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event replaced", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<EventRequest>,
) -> EventResult<Json<Event>> {
    state.service.ensure_exists(id).await?;
    let event = state.to_event(request).await?;
    Ok(Json(state.service.update_event(id, event).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    IdPath(id): IdPath,
) -> EventResult<StatusCode> {
    state.service.delete_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/upcoming",
    tag = TAG,
    responses((status = 200, description = "Events after now", body = Vec<Event>))
)]
async fn upcoming_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
) -> EventResult<Json<Vec<Event>>> {
    Ok(Json(state.service.get_upcoming_events().await?))
}

#[utoipa::path(
    get,
    path = "/past",
    tag = TAG,
    responses((status = 200, description = "Events before now", body = Vec<Event>))
)]
async fn past_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
) -> EventResult<Json<Vec<Event>>> {
    Ok(Json(state.service.get_past_events().await?))
}

#[utoipa::path(
    get,
    path = "/active",
    tag = TAG,
    responses((status = 200, description = "Events not yet archived", body = Vec<Event>))
)]
async fn active_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
) -> EventResult<Json<Vec<Event>>> {
    Ok(Json(state.service.get_active_events().await?))
}

#[utoipa::path(
    get,
    path = "/today",
    tag = TAG,
    responses((status = 200, description = "Events on the current UTC day", body = Vec<Event>))
)]
async fn todays_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
) -> EventResult<Json<Vec<Event>>> {
    Ok(Json(state.service.get_todays_events().await?))
}

#[utoipa::path(
    post,
    path = "/{id}/cancel",
    tag = TAG,
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event canceled", body = Event),
        (status = 400, response = BusinessRuleResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn cancel_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    IdPath(id): IdPath,
) -> EventResult<Json<Event>> {
    Ok(Json(state.service.cancel_event(id).await?))
}

#[utoipa::path(
    post,
    path = "/archive",
    tag = TAG,
    responses(
        (status = 200, description = "Old events deactivated", body = ArchiveResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn archive_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
) -> EventResult<Json<ArchiveResponse>> {
    let archived = state.service.archive_old_events().await?;
    Ok(Json(ArchiveResponse { archived }))
}

#[utoipa::path(
    get,
    path = "/{id}/teaser",
    tag = TAG,
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Promotional one-liner", body = TeaserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn event_teaser<R: EventRepository>(
    State(state): State<EventsState<R>>,
    IdPath(id): IdPath,
) -> EventResult<Json<TeaserResponse>> {
    let event = state.service.get_event_by_id(id).await?;
    let teaser = state.service.generate_teaser(&event)?;
    Ok(Json(TeaserResponse { teaser }))
}
