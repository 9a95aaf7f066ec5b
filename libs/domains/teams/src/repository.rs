use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::TeamResult;
use crate::models::Team;

/// Persistence for team rows. Returned teams have an empty roster; the
/// service fills it in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_all(&self) -> TeamResult<Vec<Team>>;

    async fn find_by_id(&self, id: i64) -> TeamResult<Option<Team>>;

    async fn save(&self, team: Team) -> TeamResult<Team>;

    async fn exists_by_id(&self, id: i64) -> TeamResult<bool>;

    async fn delete_by_id(&self, id: i64) -> TeamResult<()>;

    async fn exists_by_name(&self, name: &str) -> TeamResult<bool>;

    async fn find_by_region(&self, region: &str) -> TeamResult<Vec<Team>>;

    async fn find_by_active_true(&self) -> TeamResult<Vec<Team>>;

    async fn count(&self) -> TeamResult<u64>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryTeamRepository {
    teams: Arc<RwLock<HashMap<i64, Team>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self {
            teams: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Team>
    where
        F: Fn(&Team) -> bool,
    {
        let teams = self.teams.read().await;
        let mut result: Vec<Team> = teams.values().filter(|t| predicate(t)).cloned().collect();
        result.sort_by_key(|t| t.id);
        result
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn find_all(&self) -> TeamResult<Vec<Team>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> TeamResult<Option<Team>> {
        Ok(self.teams.read().await.get(&id).cloned())
    }

    async fn save(&self, mut team: Team) -> TeamResult<Team> {
        let id = match team.id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        team.id = Some(id);
        team.players.clear();

        self.teams.write().await.insert(id, team.clone());
        tracing::debug!(team_id = id, "Saved team");
        Ok(team)
    }

    async fn exists_by_id(&self, id: i64) -> TeamResult<bool> {
        Ok(self.teams.read().await.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> TeamResult<()> {
        self.teams.write().await.remove(&id);
        Ok(())
    }

    async fn exists_by_name(&self, name: &str) -> TeamResult<bool> {
        Ok(self.teams.read().await.values().any(|t| t.name == name))
    }

    async fn find_by_region(&self, region: &str) -> TeamResult<Vec<Team>> {
        Ok(self.filtered(|t| t.region == region).await)
    }

    async fn find_by_active_true(&self) -> TeamResult<Vec<Team>> {
        Ok(self.filtered(|t| t.active).await)
    }

    async fn count(&self) -> TeamResult<u64> {
        Ok(self.teams.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn team(name: &str, region: &str) -> Team {
        Team::new(name, region, NaiveDate::from_ymd_opt(2012, 5, 1).unwrap())
    }

    #[tokio::test]
    async fn test_save_find_and_delete() {
        let repo = InMemoryTeamRepository::new();
        let saved = repo.save(team("G2", "EUW")).await.unwrap();
        assert_eq!(saved.id, Some(1));

        assert!(repo.exists_by_name("G2").await.unwrap());
        assert!(!repo.exists_by_name("g2").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete_by_id(1).await.unwrap();
        assert!(!repo.exists_by_id(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_region_and_active_queries() {
        let repo = InMemoryTeamRepository::new();
        repo.save(team("G2", "EUW")).await.unwrap();
        repo.save(team("T1", "KR")).await.unwrap();
        let mut retired = team("Origen", "EUW");
        retired.active = false;
        repo.save(retired).await.unwrap();

        assert_eq!(repo.find_by_region("EUW").await.unwrap().len(), 2);
        let active: Vec<String> = repo
            .find_by_active_true()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(active, vec!["G2", "T1"]);
    }
}
