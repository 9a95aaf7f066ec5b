//! HTTP-level tests for the events router.
//!
//! Teams and players live in in-memory stores; the event service runs on a
//! fixed clock so date-dependent routes are deterministic.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use domain_events::*;
use domain_players::{InMemoryPlayerRepository, Player, PlayerRepository};
use domain_teams::{InMemoryTeamRepository, Team, TeamService};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 19, 10, 0, 0).unwrap()
}

/// Router with teams 1 (Dragons) and 2 (Phoenix), two players each
async fn app() -> Router {
    let players = Arc::new(InMemoryPlayerRepository::new());
    for (first, last, team) in [
        ("Alice", "Anderson", "Dragons"),
        ("Bob", "Brown", "Dragons"),
        ("Charlie", "Clark", "Phoenix"),
        ("Dave", "Dixon", "Phoenix"),
    ] {
        let email = format!("{}@arena.test", first.to_lowercase());
        players
            .save(Player::new(first, last, email, 25, "Attacker").with_team(team, None))
            .await
            .unwrap();
    }

    let teams = TeamService::new(InMemoryTeamRepository::new(), players);
    let founded = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    teams.create_team(Team::new("Dragons", "EU", founded)).await.unwrap();
    teams.create_team(Team::new("Phoenix", "EU", founded)).await.unwrap();

    let events = EventService::with_clock(
        InMemoryEventRepository::new(),
        Arc::new(FixedClock::new(now())),
    );
    handlers::router(Arc::new(events), Arc::new(teams))
}

fn send(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn final_body(event_date: DateTime<Utc>) -> Value {
    json!({
        "name": "Grande Finale",
        "description": "Season final",
        "event_date": event_date,
        "team_a_id": 1,
        "team_b_id": 2,
        "city": "Paris"
    })
}

#[tokio::test]
async fn test_create_event_and_read_teaser() {
    let app = app().await;
    let date = Utc.with_ymd_and_hms(2025, 7, 1, 20, 0, 0).unwrap();

    let response = app
        .clone()
        .oneshot(send("POST", "/", Some(final_body(date))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let event: Event = json_body(response.into_body()).await;
    assert_eq!(event.id, Some(1));
    assert!(event.active);

    let response = app.oneshot(send("GET", "/1/teaser", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: TeaserResponse = json_body(response.into_body()).await;
    assert_eq!(
        body.teaser,
        "Dragons vs Phoenix – 2025-07-01T20:00 at Paris. Players: Alice Anderson, Bob Brown vs Charlie Clark, Dave Dixon"
    );
}

#[tokio::test]
async fn test_create_with_one_team_is_rejected() {
    let mut body = final_body(now() + Duration::days(5));
    body["team_b_id"] = Value::Null;

    let response = app().await.oneshot(send("POST", "/", Some(body))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Both teamA and teamB are required");
}

#[tokio::test]
async fn test_create_with_unknown_team_is_not_found() {
    let mut body = final_body(now() + Duration::days(5));
    body["team_b_id"] = json!(42);

    let response = app().await.oneshot(send("POST", "/", Some(body))).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Team not found with ID: 42");
}

#[tokio::test]
async fn test_blank_name_wins_over_unknown_team() {
    let mut body = final_body(now() + Duration::days(5));
    body["name"] = json!("");
    body["team_a_id"] = json!(999);

    let response = app().await.oneshot(send("POST", "/", Some(body))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Event name is required");
}

#[tokio::test]
async fn test_one_sided_unknown_team_is_rejected_before_lookup() {
    let mut body = final_body(now() + Duration::days(5));
    body["team_a_id"] = json!(999);
    body["team_b_id"] = Value::Null;

    let response = app().await.oneshot(send("POST", "/", Some(body))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Both teamA and teamB are required");
}

#[tokio::test]
async fn test_update_missing_event_wins_over_unknown_team() {
    let mut body = final_body(now() + Duration::days(5));
    body["team_a_id"] = json!(42);

    let response = app()
        .await
        .oneshot(send("PUT", "/999", Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Event not found with ID: 999");
}

#[tokio::test]
async fn test_missing_name_and_description_reach_event_rules() {
    let app = app().await;

    let mut body = final_body(now() + Duration::days(5));
    body.as_object_mut().unwrap().remove("name");
    let response = app.clone().oneshot(send("POST", "/", Some(body))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Event name is required");

    let mut body = final_body(now() + Duration::days(5));
    body.as_object_mut().unwrap().remove("description");
    let response = app.oneshot(send("POST", "/", Some(body))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Event description is required");
}

#[tokio::test]
async fn test_create_missing_date_reports_service_message() {
    let mut body = final_body(now());
    body["event_date"] = Value::Null;

    let response = app().await.oneshot(send("POST", "/", Some(body))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Event date is required");
}

#[tokio::test]
async fn test_duplicate_name_conflicts() {
    let app = app().await;
    let body = final_body(now() + Duration::days(5));
    app.clone()
        .oneshot(send("POST", "/", Some(body.clone())))
        .await
        .unwrap();

    let response = app.oneshot(send("POST", "/", Some(body))).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Event name already exists: Grande Finale");
}

#[tokio::test]
async fn test_cancel_respects_notice_window() {
    let app = app().await;
    let mut soon = final_body(now() + Duration::hours(23));
    soon["name"] = json!("Soon");
    app.clone().oneshot(send("POST", "/", Some(soon))).await.unwrap();
    let mut later = final_body(now() + Duration::days(2));
    later["name"] = json!("Later");
    app.clone().oneshot(send("POST", "/", Some(later))).await.unwrap();

    let refused = app
        .clone()
        .oneshot(send("POST", "/1/cancel", None))
        .await
        .unwrap();
    assert_eq!(refused.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(refused.into_body()).await;
    assert_eq!(
        error["message"],
        "You can't cancel an event less than 24 hours before it starts."
    );

    let accepted = app.oneshot(send("POST", "/2/cancel", None)).await.unwrap();
    assert_eq!(accepted.status(), StatusCode::OK);
    let event: Event = json_body(accepted.into_body()).await;
    assert!(event.canceled);
}

#[tokio::test]
async fn test_cancel_id_zero_is_bad_request() {
    let response = app()
        .await
        .oneshot(send("POST", "/0/cancel", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Event ID must be positive");
}

#[tokio::test]
async fn test_archive_and_date_queries() {
    let app = app().await;
    for (name, offset) in [
        ("Old", -Duration::days(40)),
        ("Recent", -Duration::days(10)),
        ("Today", Duration::hours(2)),
        ("Next week", Duration::days(7)),
    ] {
        let mut body = final_body(now() + offset);
        body["name"] = json!(name);
        let response = app.clone().oneshot(send("POST", "/", Some(body))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(send("POST", "/archive", None))
        .await
        .unwrap();
    let body: ArchiveResponse = json_body(response.into_body()).await;
    assert_eq!(body.archived, 1);

    let names = |events: Vec<Event>| events.into_iter().map(|e| e.name).collect::<Vec<_>>();

    let active: Vec<Event> =
        json_body(app.clone().oneshot(send("GET", "/active", None)).await.unwrap().into_body())
            .await;
    assert_eq!(names(active), vec!["Recent", "Today", "Next week"]);

    let today: Vec<Event> =
        json_body(app.clone().oneshot(send("GET", "/today", None)).await.unwrap().into_body())
            .await;
    assert_eq!(names(today), vec!["Today"]);

    let upcoming: Vec<Event> =
        json_body(app.clone().oneshot(send("GET", "/upcoming", None)).await.unwrap().into_body())
            .await;
    assert_eq!(names(upcoming), vec!["Today", "Next week"]);

    let past: Vec<Event> =
        json_body(app.oneshot(send("GET", "/past", None)).await.unwrap().into_body()).await;
    assert_eq!(names(past), vec!["Old", "Recent"]);
}

#[tokio::test]
async fn test_update_and_delete() {
    let app = app().await;
    app.clone()
        .oneshot(send("POST", "/", Some(final_body(now() + Duration::days(3)))))
        .await
        .unwrap();

    let mut replacement = final_body(now() + Duration::days(4));
    replacement["city"] = Value::Null;
    replacement["active"] = json!(false);
    let response = app
        .clone()
        .oneshot(send("PUT", "/1", Some(replacement)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let event: Event = json_body(response.into_body()).await;
    assert!(event.city.is_none());
    assert!(!event.active);

    let missing = app
        .clone()
        .oneshot(send("PUT", "/9", Some(final_body(now()))))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let deleted = app.clone().oneshot(send("DELETE", "/1", None)).await.unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app.oneshot(send("DELETE", "/1", None)).await.unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
