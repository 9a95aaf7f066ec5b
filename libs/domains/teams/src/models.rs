use chrono::{DateTime, NaiveDate, Utc};
use domain_players::Player;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A team and, when loaded through the service, its roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Team {
    pub id: Option<i64>,
    pub name: String,
    /// Short region code, e.g. "EUW"
    pub region: String,
    pub founded_date: Option<NaiveDate>,
    pub contact_email: Option<String>,
    pub phone_number: Option<String>,
    pub budget: Option<f64>,
    pub wins: i32,
    pub losses: i32,
    pub active: bool,
    pub description: Option<String>,
    #[serde(default)]
    pub players: Vec<Player>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: impl Into<String>, region: impl Into<String>, founded_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            region: region.into(),
            founded_date: Some(founded_date),
            contact_email: None,
            phone_number: None,
            budget: None,
            wins: 0,
            losses: 0,
            active: true,
            description: None,
            players: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Percentage of games won, 0.0 before the first game.
    pub fn win_rate(&self) -> f64 {
        let games = self.wins + self.losses;
        if games == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(games) * 100.0
    }

    pub fn add_player(&mut self, mut player: Player) {
        player.team_name = Some(self.name.clone());
        self.players.push(player);
    }

    /// Detaches the player with this id and returns it with its team cleared.
    pub fn remove_player(&mut self, player_id: i64) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == Some(player_id))?;
        let mut player = self.players.remove(index);
        player.team_name = None;
        Some(player)
    }
}

/// Body of `POST /teams` and `PUT /teams/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TeamRequest {
    #[serde(default)]
    #[validate(length(max = 50, message = "Team name must be between 2 and 50 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 10, message = "Region code must not exceed 10 characters"))]
    pub region: String,
    pub founded_date: Option<NaiveDate>,
    #[validate(email(message = "Invalid email format"))]
    pub contact_email: Option<String>,
    #[validate(length(max = 20, message = "Phone number must not exceed 20 characters"))]
    pub phone_number: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Budget must be positive"))]
    pub budget: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Wins cannot be negative"))]
    pub wins: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Losses cannot be negative"))]
    pub losses: i32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
}

fn default_active() -> bool {
    true
}

impl From<TeamRequest> for Team {
    fn from(req: TeamRequest) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: req.name,
            region: req.region,
            founded_date: req.founded_date,
            contact_email: req.contact_email,
            phone_number: req.phone_number,
            budget: req.budget,
            wins: req.wins,
            losses: req.losses,
            active: req.active,
            description: req.description,
            players: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeamCount {
    pub count: u64,
}
