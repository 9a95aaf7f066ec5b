use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::PlayerResult;
use crate::models::Player;

/// Persistence for players.
///
/// Name and email arguments are passed through as given; callers normalise
/// them first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn find_all(&self) -> PlayerResult<Vec<Player>>;

    async fn find_by_id(&self, id: i64) -> PlayerResult<Option<Player>>;

    async fn find_by_email(&self, email: &str) -> PlayerResult<Option<Player>>;

    /// Inserts when `player.id` is `None`, otherwise overwrites
    async fn save(&self, player: Player) -> PlayerResult<Player>;

    async fn exists_by_id(&self, id: i64) -> PlayerResult<bool>;

    async fn delete_by_id(&self, id: i64) -> PlayerResult<()>;

    async fn exists_by_email(&self, email: &str) -> PlayerResult<bool>;

    async fn exists_by_jersey_number_and_team_name(
        &self,
        jersey_number: i32,
        team_name: &str,
    ) -> PlayerResult<bool>;

    async fn find_by_team_name(&self, team_name: &str) -> PlayerResult<Vec<Player>>;

    async fn count_by_team_name(&self, team_name: &str) -> PlayerResult<u64>;

    /// Case-insensitive
    async fn find_by_position(&self, position: &str) -> PlayerResult<Vec<Player>>;

    /// Both bounds inclusive
    async fn find_by_age_between(&self, min_age: i32, max_age: i32) -> PlayerResult<Vec<Player>>;

    async fn find_by_active(&self, active: bool) -> PlayerResult<Vec<Player>>;

    async fn count_by_active(&self, active: bool) -> PlayerResult<u64>;

    /// Case-insensitive substring match on "first last"
    async fn find_by_full_name_containing(&self, fragment: &str) -> PlayerResult<Vec<Player>>;

    /// Strictly greater than `min_salary`, highest first
    async fn find_with_salary_above(&self, min_salary: f64) -> PlayerResult<Vec<Player>>;
}

/// In-memory store used by the dev server and tests
#[derive(Debug, Default, Clone)]
pub struct InMemoryPlayerRepository {
    players: Arc<RwLock<HashMap<i64, Player>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self {
            players: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Player>
    where
        F: Fn(&Player) -> bool,
    {
        let players = self.players.read().await;
        let mut result: Vec<Player> = players.values().filter(|p| predicate(p)).cloned().collect();
        result.sort_by_key(|p| p.id);
        result
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn find_all(&self) -> PlayerResult<Vec<Player>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> PlayerResult<Option<Player>> {
        Ok(self.players.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> PlayerResult<Option<Player>> {
        let players = self.players.read().await;
        Ok(players.values().find(|p| p.email == email).cloned())
    }

    async fn save(&self, mut player: Player) -> PlayerResult<Player> {
        let id = match player.id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        player.id = Some(id);

        self.players.write().await.insert(id, player.clone());
        tracing::debug!(player_id = id, "Saved player");
        Ok(player)
    }

    async fn exists_by_id(&self, id: i64) -> PlayerResult<bool> {
        Ok(self.players.read().await.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> PlayerResult<()> {
        self.players.write().await.remove(&id);
        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> PlayerResult<bool> {
        let players = self.players.read().await;
        Ok(players.values().any(|p| p.email == email))
    }

    async fn exists_by_jersey_number_and_team_name(
        &self,
        jersey_number: i32,
        team_name: &str,
    ) -> PlayerResult<bool> {
        let players = self.players.read().await;
        Ok(players.values().any(|p| {
            p.jersey_number == Some(jersey_number) && p.team_name.as_deref() == Some(team_name)
        }))
    }

    async fn find_by_team_name(&self, team_name: &str) -> PlayerResult<Vec<Player>> {
        Ok(self
            .filtered(|p| p.team_name.as_deref() == Some(team_name))
            .await)
    }

    async fn count_by_team_name(&self, team_name: &str) -> PlayerResult<u64> {
        Ok(self.find_by_team_name(team_name).await?.len() as u64)
    }

    async fn find_by_position(&self, position: &str) -> PlayerResult<Vec<Player>> {
        Ok(self
            .filtered(|p| p.position.eq_ignore_ascii_case(position))
            .await)
    }

    async fn find_by_age_between(&self, min_age: i32, max_age: i32) -> PlayerResult<Vec<Player>> {
        Ok(self
            .filtered(|p| (min_age..=max_age).contains(&p.age))
            .await)
    }

    async fn find_by_active(&self, active: bool) -> PlayerResult<Vec<Player>> {
        Ok(self.filtered(|p| p.active == active).await)
    }

    async fn count_by_active(&self, active: bool) -> PlayerResult<u64> {
        Ok(self.find_by_active(active).await?.len() as u64)
    }

    async fn find_by_full_name_containing(&self, fragment: &str) -> PlayerResult<Vec<Player>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .filtered(|p| p.full_name().to_lowercase().contains(&needle))
            .await)
    }

    async fn find_with_salary_above(&self, min_salary: f64) -> PlayerResult<Vec<Player>> {
        let mut result = self
            .filtered(|p| p.salary.is_some_and(|s| s > min_salary))
            .await;
        result.sort_by(|a, b| b.salary.unwrap_or_default().total_cmp(&a.salary.unwrap_or_default()));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(first: &str, email: &str, age: i32) -> Player {
        Player::new(first, "Tester", email, age, "Forward")
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryPlayerRepository::new();

        let first = repo.save(player("Ann", "ann@arena.test", 20)).await.unwrap();
        let second = repo.save(player("Ben", "ben@arena.test", 22)).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites() {
        let repo = InMemoryPlayerRepository::new();
        let mut saved = repo.save(player("Ann", "ann@arena.test", 20)).await.unwrap();

        saved.age = 21;
        repo.save(saved.clone()).await.unwrap();

        let fetched = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(fetched.age, 21);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_jersey_lookup_is_scoped_to_team() {
        let repo = InMemoryPlayerRepository::new();
        repo.save(player("Ann", "ann@arena.test", 20).with_team("Lions", Some(9)))
            .await
            .unwrap();

        assert!(repo.exists_by_jersey_number_and_team_name(9, "Lions").await.unwrap());
        assert!(!repo.exists_by_jersey_number_and_team_name(9, "Tigers").await.unwrap());
        assert!(!repo.exists_by_jersey_number_and_team_name(10, "Lions").await.unwrap());
    }

    #[tokio::test]
    async fn test_age_range_is_inclusive() {
        let repo = InMemoryPlayerRepository::new();
        for (i, age) in [17, 18, 25, 30, 31].into_iter().enumerate() {
            repo.save(player("P", &format!("p{i}@arena.test"), age))
                .await
                .unwrap();
        }

        let ages: Vec<i32> = repo
            .find_by_age_between(18, 30)
            .await
            .unwrap()
            .iter()
            .map(|p| p.age)
            .collect();
        assert_eq!(ages, vec![18, 25, 30]);
    }

    #[tokio::test]
    async fn test_full_name_search_ignores_case() {
        let repo = InMemoryPlayerRepository::new();
        repo.save(Player::new("Marie", "Curie", "marie@arena.test", 30, "Center"))
            .await
            .unwrap();

        assert_eq!(repo.find_by_full_name_containing("IE CU").await.unwrap().len(), 1);
        assert!(repo.find_by_full_name_containing("pierre").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_salary_above_sorted_descending() {
        let repo = InMemoryPlayerRepository::new();
        for (i, salary) in [1000.0, 5000.0, 3000.0].into_iter().enumerate() {
            repo.save(player("P", &format!("p{i}@arena.test"), 25).with_salary(salary))
                .await
                .unwrap();
        }
        repo.save(player("Free", "free@arena.test", 25)).await.unwrap();

        let salaries: Vec<f64> = repo
            .find_with_salary_above(1000.0)
            .await
            .unwrap()
            .iter()
            .filter_map(|p| p.salary)
            .collect();
        assert_eq!(salaries, vec![5000.0, 3000.0]);
    }
}
