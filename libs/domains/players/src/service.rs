use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use validator::ValidateEmail;

use crate::error::{PlayerError, PlayerResult};
use crate::models::Player;
use crate::repository::PlayerRepository;

/// Player registration, lookup and status management
#[derive(Clone)]
pub struct PlayerService<R: PlayerRepository> {
    repository: Arc<R>,
}

impl<R: PlayerRepository> PlayerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Shares an existing repository handle, e.g. with the team service.
    pub fn from_arc(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> Arc<R> {
        Arc::clone(&self.repository)
    }

    #[instrument(skip(self, player), fields(email = %player.email))]
    pub async fn create_player(&self, mut player: Player) -> PlayerResult<Player> {
        validate_player(Some(&player))?;

        if self.repository.exists_by_email(&player.email).await? {
            return Err(PlayerError::DuplicateEmail(player.email));
        }

        if let (Some(team_name), Some(jersey_number)) = (&player.team_name, player.jersey_number) {
            if self
                .repository
                .exists_by_jersey_number_and_team_name(jersey_number, team_name)
                .await?
            {
                return Err(PlayerError::JerseyTaken {
                    jersey_number,
                    team_name: team_name.clone(),
                });
            }
        }

        let now = Utc::now();
        player.id = None;
        player.created_at = now;
        player.updated_at = now;

        let saved = self.repository.save(player).await?;
        tracing::info!(player_id = ?saved.id, "Created player");
        Ok(saved)
    }

    pub async fn get_all_players(&self) -> PlayerResult<Vec<Player>> {
        self.repository.find_all().await
    }

    pub async fn get_player_by_id(&self, id: i64) -> PlayerResult<Player> {
        check_id(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PlayerError::NotFound(id))
    }

    /// Trims and lower-cases before lookup; `None` when nobody matches.
    pub async fn get_player_by_email(&self, email: &str) -> PlayerResult<Option<Player>> {
        if email.trim().is_empty() {
            return Err(PlayerError::validation(
                "email",
                "Email cannot be null or empty",
            ));
        }
        self.repository
            .find_by_email(&email.trim().to_lowercase())
            .await
    }

    #[instrument(skip(self, details))]
    pub async fn update_player(&self, id: i64, details: Player) -> PlayerResult<Player> {
        check_id(id)?;
        let mut existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PlayerError::NotFound(id))?;

        validate_player(Some(&details))?;

        if details.email != existing.email && self.repository.exists_by_email(&details.email).await?
        {
            return Err(PlayerError::DuplicateEmail(details.email));
        }

        if let (Some(team_name), Some(jersey_number)) = (&details.team_name, details.jersey_number) {
            let assignment_changed = existing.team_name.as_deref() != Some(team_name.as_str())
                || existing.jersey_number != Some(jersey_number);

            if assignment_changed
                && self
                    .repository
                    .exists_by_jersey_number_and_team_name(jersey_number, team_name)
                    .await?
            {
                return Err(PlayerError::JerseyTaken {
                    jersey_number,
                    team_name: team_name.clone(),
                });
            }
        }

        existing.first_name = details.first_name;
        existing.last_name = details.last_name;
        existing.email = details.email;
        existing.age = details.age;
        existing.position = details.position;
        existing.team_name = details.team_name;
        existing.jersey_number = details.jersey_number;
        existing.salary = details.salary;
        existing.active = details.active;
        existing.updated_at = Utc::now();

        let saved = self.repository.save(existing).await?;
        tracing::info!(player_id = id, "Updated player");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete_player(&self, id: i64) -> PlayerResult<()> {
        check_id(id)?;
        if !self.repository.exists_by_id(id).await? {
            return Err(PlayerError::NotFound(id));
        }
        self.repository.delete_by_id(id).await?;
        tracing::info!(player_id = id, "Deleted player");
        Ok(())
    }

    pub async fn get_players_by_team(&self, team_name: &str) -> PlayerResult<Vec<Player>> {
        let team_name = required_text(team_name, "team_name", "Team name cannot be null or empty")?;
        self.repository.find_by_team_name(team_name).await
    }

    pub async fn get_players_by_position(&self, position: &str) -> PlayerResult<Vec<Player>> {
        let position = required_text(position, "position", "Position cannot be null or empty")?;
        self.repository.find_by_position(position).await
    }

    pub async fn get_players_by_age_range(
        &self,
        min_age: i32,
        max_age: i32,
    ) -> PlayerResult<Vec<Player>> {
        if min_age < 0 || max_age < 0 {
            return Err(PlayerError::validation(
                "age",
                "Age values must be non-negative",
            ));
        }
        if min_age > max_age {
            return Err(PlayerError::validation(
                "age",
                "Minimum age cannot be greater than maximum age",
            ));
        }
        self.repository.find_by_age_between(min_age, max_age).await
    }

    pub async fn get_active_players(&self) -> PlayerResult<Vec<Player>> {
        self.repository.find_by_active(true).await
    }

    pub async fn get_inactive_players(&self) -> PlayerResult<Vec<Player>> {
        self.repository.find_by_active(false).await
    }

    pub async fn deactivate_player(&self, id: i64) -> PlayerResult<Player> {
        self.set_active(id, false).await
    }

    pub async fn activate_player(&self, id: i64) -> PlayerResult<Player> {
        self.set_active(id, true).await
    }

    async fn set_active(&self, id: i64, active: bool) -> PlayerResult<Player> {
        let mut player = self.get_player_by_id(id).await?;
        player.active = active;
        player.updated_at = Utc::now();

        let saved = self.repository.save(player).await?;
        tracing::info!(player_id = id, active, "Changed player status");
        Ok(saved)
    }

    pub async fn count_players_by_team(&self, team_name: &str) -> PlayerResult<u64> {
        let team_name = required_text(team_name, "team_name", "Team name cannot be null or empty")?;
        self.repository.count_by_team_name(team_name).await
    }

    pub async fn count_active_players(&self) -> PlayerResult<u64> {
        self.repository.count_by_active(true).await
    }

    pub async fn find_players_by_full_name(&self, full_name: &str) -> PlayerResult<Vec<Player>> {
        let full_name = required_text(full_name, "name", "Full name cannot be null or empty")?;
        self.repository.find_by_full_name_containing(full_name).await
    }

    pub async fn get_players_with_salary_above(&self, min_salary: f64) -> PlayerResult<Vec<Player>> {
        if min_salary < 0.0 {
            return Err(PlayerError::validation(
                "salary",
                "Minimum salary must be non-negative",
            ));
        }
        self.repository.find_with_salary_above(min_salary).await
    }

    /// 0.0 for a team with no players
    pub async fn calculate_average_age_by_team(&self, team_name: &str) -> PlayerResult<f64> {
        let players = self.get_players_by_team(team_name).await?;
        if players.is_empty() {
            return Ok(0.0);
        }
        let total: i64 = players.iter().map(|p| i64::from(p.age)).sum();
        Ok(total as f64 / players.len() as f64)
    }
}

fn check_id(id: i64) -> PlayerResult<()> {
    if id <= 0 {
        return Err(PlayerError::InvalidId);
    }
    Ok(())
}

fn required_text<'a>(
    value: &'a str,
    field: &'static str,
    message: &'static str,
) -> PlayerResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PlayerError::validation(field, message));
    }
    Ok(trimmed)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Business rules for a player, first failure wins.
pub fn validate_player(player: Option<&Player>) -> PlayerResult<()> {
    let Some(player) = player else {
        return Err(PlayerError::validation("player", "Player cannot be null"));
    };

    if is_blank(&player.first_name) {
        return Err(PlayerError::validation("first_name", "First name is required"));
    }
    if is_blank(&player.last_name) {
        return Err(PlayerError::validation("last_name", "Last name is required"));
    }
    if is_blank(&player.email) {
        return Err(PlayerError::validation("email", "Email is required"));
    }
    if !(0..=150).contains(&player.age) {
        return Err(PlayerError::validation("age", "Age must be between 0 and 150"));
    }
    if is_blank(&player.position) {
        return Err(PlayerError::validation("position", "Position is required"));
    }
    if player.salary.is_some_and(|s| s < 0.0) {
        return Err(PlayerError::validation("salary", "Salary cannot be negative"));
    }
    if player.jersey_number.is_some_and(|n| !(1..=99).contains(&n)) {
        return Err(PlayerError::validation(
            "jersey_number",
            "Jersey number must be between 1 and 99",
        ));
    }

    let length = |s: &str| s.trim().chars().count();
    if !(2..=50).contains(&length(&player.first_name)) {
        return Err(PlayerError::validation(
            "first_name",
            "First name must be between 2 and 50 characters",
        ));
    }
    if !(2..=50).contains(&length(&player.last_name)) {
        return Err(PlayerError::validation(
            "last_name",
            "Last name must be between 2 and 50 characters",
        ));
    }
    if !player.email.validate_email() {
        return Err(PlayerError::validation("email", "Email should be valid"));
    }
    if !(2..=30).contains(&length(&player.position)) {
        return Err(PlayerError::validation(
            "position",
            "Position must be between 2 and 30 characters",
        ));
    }

    Ok(())
}
