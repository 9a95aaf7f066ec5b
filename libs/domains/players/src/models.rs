use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A registered player.
///
/// A player belongs to a team through `team_name`; the team's roster is the
/// set of players sharing that name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Player {
    /// Assigned by the store on first save
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i32,
    pub position: String,
    pub team_name: Option<String>,
    /// 1-99, unique within a team
    pub jersey_number: Option<i32>,
    pub salary: Option<f64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        age: i32,
        position: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            age,
            position: position.into(),
            team_name: None,
            jersey_number: None,
            salary: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_team(mut self, team_name: impl Into<String>, jersey_number: Option<i32>) -> Self {
        self.team_name = Some(team_name.into());
        self.jersey_number = jersey_number;
        self
    }

    pub fn with_salary(mut self, salary: f64) -> Self {
        self.salary = Some(salary);
        self
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of `POST /players` and `PUT /players/{id}`.
///
/// Only upper bounds and the presence of `age` are checked here. Missing
/// strings deserialize as empty so the service's "is required" rules report
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PlayerRequest {
    #[serde(default)]
    #[validate(length(max = 50, message = "First name must be between 2 and 50 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "Last name must be between 2 and 50 characters"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Email must not exceed 100 characters"))]
    pub email: String,
    #[validate(required(message = "Age is mandatory"))]
    pub age: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 30, message = "Position must be between 2 and 30 characters"))]
    pub position: String,
    #[validate(length(max = 50, message = "Team name must not exceed 50 characters"))]
    pub team_name: Option<String>,
    pub jersey_number: Option<i32>,
    pub salary: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl From<PlayerRequest> for Player {
    fn from(req: PlayerRequest) -> Self {
        let mut player = Player::new(
            req.first_name,
            req.last_name,
            req.email,
            req.age.unwrap_or_default(),
            req.position,
        );
        player.team_name = req.team_name;
        player.jersey_number = req.jersey_number;
        player.salary = req.salary;
        player.active = req.active;
        player
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AgeRangeQuery {
    pub min_age: i32,
    pub max_age: i32,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NameQuery {
    /// Case-insensitive fragment of "first last"
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SalaryQuery {
    pub min_salary: f64,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AverageAgeResponse {
    pub team_name: String,
    pub average_age: f64,
}
