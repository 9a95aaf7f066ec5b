use async_trait::async_trait;
use domain_players::PlayerRepository;
use domain_teams::{Team, TeamError, TeamRepository, TeamService};

use crate::error::{EventError, EventResult};

/// Resolves the team ids of an event request into teams with rosters.
#[async_trait]
pub trait TeamLookup: Send + Sync {
    async fn team_by_id(&self, id: i64) -> EventResult<Team>;

    /// `None` ids stay `None`
    async fn resolve(&self, id: Option<i64>) -> EventResult<Option<Team>> {
        match id {
            Some(id) => self.team_by_id(id).await.map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<R, P> TeamLookup for TeamService<R, P>
where
    R: TeamRepository,
    P: PlayerRepository,
{
    async fn team_by_id(&self, id: i64) -> EventResult<Team> {
        self.get_team_by_id(id).await.map_err(|err| match err {
            TeamError::NotFound(id) => EventError::TeamNotFound(id),
            TeamError::InvalidId | TeamError::Validation { .. } => {
                EventError::Validation(err.to_string())
            }
            other => EventError::Database(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain_players::InMemoryPlayerRepository;
    use domain_teams::InMemoryTeamRepository;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_team_service_lookup() {
        let teams = TeamService::new(
            InMemoryTeamRepository::new(),
            Arc::new(InMemoryPlayerRepository::new()),
        );
        teams
            .create_team(Team::new(
                "Dragons",
                "EU",
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(teams.resolve(Some(1)).await.unwrap().unwrap().name, "Dragons");
        assert!(teams.resolve(None).await.unwrap().is_none());
        assert_eq!(
            teams.team_by_id(5).await.unwrap_err(),
            EventError::TeamNotFound(5)
        );
        assert_eq!(
            teams.team_by_id(0).await.unwrap_err().to_string(),
            "Team ID must be positive"
        );
    }
}
