use chrono::{DateTime, Utc};
use domain_teams::Team;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A scheduled match between two teams.
///
/// `active` is cleared by archival and `canceled` is set by cancellation;
/// the two flags are independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    /// Always present on stored events; `None` only on an unvalidated candidate
    pub event_date: Option<DateTime<Utc>>,
    pub active: bool,
    pub canceled: bool,
    pub team_a: Option<Team>,
    pub team_b: Option<Team>,
    pub city: Option<String>,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        event_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            event_date: Some(event_date),
            active: true,
            canceled: false,
            team_a: None,
            team_b: None,
            city: None,
        }
    }

    pub fn with_teams(mut self, team_a: Team, team_b: Team) -> Self {
        self.team_a = Some(team_a);
        self.team_b = Some(team_b);
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

/// Body of `POST /events` and `PUT /events/{id}`. Teams are referenced by id
/// and resolved before the event reaches the service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EventRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Event name must be between 2 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: String,
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub team_a_id: Option<i64>,
    pub team_b_id: Option<i64>,
    #[validate(length(max = 100, message = "City must not exceed 100 characters"))]
    pub city: Option<String>,
}

fn default_active() -> bool {
    true
}

impl EventRequest {
    pub fn into_event(self, team_a: Option<Team>, team_b: Option<Team>) -> Event {
        Event {
            id: None,
            name: self.name,
            description: self.description,
            event_date: self.event_date,
            active: self.active,
            canceled: false,
            team_a,
            team_b,
            city: self.city,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeaserResponse {
    pub teaser: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArchiveResponse {
    /// Number of events deactivated by this run
    pub archived: usize,
}
