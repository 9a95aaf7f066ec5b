use chrono::Utc;
use domain_players::PlayerRepository;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{TeamError, TeamResult};
use crate::models::Team;
use crate::repository::TeamRepository;

/// Team management. Teams leave the service with their roster loaded from
/// the player store.
#[derive(Clone)]
pub struct TeamService<R: TeamRepository, P: PlayerRepository> {
    repository: Arc<R>,
    players: Arc<P>,
}

impl<R: TeamRepository, P: PlayerRepository> TeamService<R, P> {
    pub fn new(repository: R, players: Arc<P>) -> Self {
        Self {
            repository: Arc::new(repository),
            players,
        }
    }

    async fn with_roster(&self, mut team: Team) -> TeamResult<Team> {
        team.players = self.players.find_by_team_name(&team.name).await?;
        Ok(team)
    }

    async fn with_rosters(&self, teams: Vec<Team>) -> TeamResult<Vec<Team>> {
        try_join_all(teams.into_iter().map(|team| self.with_roster(team))).await
    }

    pub async fn get_all_teams(&self) -> TeamResult<Vec<Team>> {
        let teams = self.repository.find_all().await?;
        self.with_rosters(teams).await
    }

    pub async fn get_team_by_id(&self, id: i64) -> TeamResult<Team> {
        if id <= 0 {
            return Err(TeamError::InvalidId);
        }
        let team = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TeamError::NotFound(id))?;
        self.with_roster(team).await
    }

    #[instrument(skip(self, team), fields(name = %team.name))]
    pub async fn create_team(&self, mut team: Team) -> TeamResult<Team> {
        validate_team(Some(&team))?;

        if self.repository.exists_by_name(&team.name).await? {
            return Err(TeamError::DuplicateName(team.name));
        }

        let now = Utc::now();
        team.id = None;
        team.created_at = now;
        team.updated_at = now;

        let saved = self.repository.save(team).await?;
        tracing::info!(team_id = ?saved.id, "Created team");
        self.with_roster(saved).await
    }

    #[instrument(skip(self, details))]
    pub async fn update_team(&self, id: i64, details: Team) -> TeamResult<Team> {
        let mut existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TeamError::NotFound(id))?;

        validate_team(Some(&details))?;

        if details.name != existing.name && self.repository.exists_by_name(&details.name).await? {
            return Err(TeamError::DuplicateName(details.name));
        }

        existing.name = details.name;
        existing.region = details.region;
        existing.founded_date = details.founded_date;
        existing.contact_email = details.contact_email;
        existing.phone_number = details.phone_number;
        existing.budget = details.budget;
        existing.wins = details.wins;
        existing.losses = details.losses;
        existing.active = details.active;
        existing.description = details.description;
        existing.updated_at = Utc::now();

        let saved = self.repository.save(existing).await?;
        tracing::info!(team_id = id, "Updated team");
        self.with_roster(saved).await
    }

    #[instrument(skip(self))]
    pub async fn delete_team(&self, id: i64) -> TeamResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(TeamError::NotFound(id));
        }
        self.repository.delete_by_id(id).await?;
        tracing::info!(team_id = id, "Deleted team");
        Ok(())
    }

    pub async fn get_teams_by_region(&self, region: &str) -> TeamResult<Vec<Team>> {
        let teams = self.repository.find_by_region(region).await?;
        self.with_rosters(teams).await
    }

    pub async fn get_active_teams(&self) -> TeamResult<Vec<Team>> {
        let teams = self.repository.find_by_active_true().await?;
        self.with_rosters(teams).await
    }

    pub async fn count_teams(&self) -> TeamResult<u64> {
        self.repository.count().await
    }
}

/// Business rules for a team, first failure wins.
pub fn validate_team(team: Option<&Team>) -> TeamResult<()> {
    let Some(team) = team else {
        return Err(TeamError::validation("team", "Team cannot be null"));
    };

    if team.name.trim().is_empty() {
        return Err(TeamError::validation("name", "Team name is required"));
    }
    if team.region.trim().is_empty() {
        return Err(TeamError::validation("region", "Team region is required"));
    }
    if team.founded_date.is_none() {
        return Err(TeamError::validation("founded_date", "Founded date is required"));
    }
    if !(2..=50).contains(&team.name.trim().chars().count()) {
        return Err(TeamError::validation(
            "name",
            "Team name must be between 2 and 50 characters",
        ));
    }

    Ok(())
}
