use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::EventResult;
use crate::models::Event;

/// Event persistence. Date comparisons are strict except for
/// [`find_by_event_date_between`](EventRepository::find_by_event_date_between),
/// which includes both bounds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_all(&self) -> EventResult<Vec<Event>>;

    async fn find_by_id(&self, id: i64) -> EventResult<Option<Event>>;

    /// Inserts when `event.id` is `None`, otherwise overwrites
    async fn save(&self, event: Event) -> EventResult<Event>;

    async fn exists_by_name(&self, name: &str) -> EventResult<bool>;

    async fn exists_by_id(&self, id: i64) -> EventResult<bool>;

    async fn delete_by_id(&self, id: i64) -> EventResult<()>;

    async fn find_by_event_date_after(&self, at: DateTime<Utc>) -> EventResult<Vec<Event>>;

    async fn find_by_event_date_before(&self, at: DateTime<Utc>) -> EventResult<Vec<Event>>;

    async fn find_by_active_true(&self) -> EventResult<Vec<Event>>;

    async fn find_by_event_date_before_and_active_true(
        &self,
        at: DateTime<Utc>,
    ) -> EventResult<Vec<Event>>;

    async fn find_by_event_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EventResult<Vec<Event>>;
}

/// Stores events together with snapshots of their teams
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<i64, Event>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Event>
    where
        F: Fn(&Event) -> bool,
    {
        let events = self.events.read().await;
        let mut result: Vec<Event> = events.values().filter(|e| predicate(e)).cloned().collect();
        result.sort_by_key(|e| (e.event_date, e.id));
        result
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn find_all(&self) -> EventResult<Vec<Event>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> EventResult<Option<Event>> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn save(&self, mut event: Event) -> EventResult<Event> {
        let id = match event.id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        event.id = Some(id);

        self.events.write().await.insert(id, event.clone());
        tracing::debug!(event_id = id, "Saved event");
        Ok(event)
    }

    async fn exists_by_name(&self, name: &str) -> EventResult<bool> {
        Ok(self.events.read().await.values().any(|e| e.name == name))
    }

    async fn exists_by_id(&self, id: i64) -> EventResult<bool> {
        Ok(self.events.read().await.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> EventResult<()> {
        self.events.write().await.remove(&id);
        Ok(())
    }

    async fn find_by_event_date_after(&self, at: DateTime<Utc>) -> EventResult<Vec<Event>> {
        Ok(self.filtered(|e| e.event_date.is_some_and(|d| d > at)).await)
    }

    async fn find_by_event_date_before(&self, at: DateTime<Utc>) -> EventResult<Vec<Event>> {
        Ok(self.filtered(|e| e.event_date.is_some_and(|d| d < at)).await)
    }

    async fn find_by_active_true(&self) -> EventResult<Vec<Event>> {
        Ok(self.filtered(|e| e.active).await)
    }

    async fn find_by_event_date_before_and_active_true(
        &self,
        at: DateTime<Utc>,
    ) -> EventResult<Vec<Event>> {
        Ok(self
            .filtered(|e| e.active && e.event_date.is_some_and(|d| d < at))
            .await)
    }

    async fn find_by_event_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EventResult<Vec<Event>> {
        Ok(self
            .filtered(|e| e.event_date.is_some_and(|d| d >= start && d <= end))
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 19, 12, 0, 0).unwrap()
    }

    async fn seeded() -> InMemoryEventRepository {
        let repo = InMemoryEventRepository::new();
        for (name, offset_hours) in [("past", -48), ("now", 0), ("future", 48)] {
            repo.save(Event::new(name, "desc", noon() + Duration::hours(offset_hours)))
                .await
                .unwrap();
        }
        repo
    }

    fn names(events: Vec<Event>) -> Vec<String> {
        events.into_iter().map(|e| e.name).collect()
    }

    #[tokio::test]
    async fn test_before_and_after_are_strict() {
        let repo = seeded().await;

        assert_eq!(names(repo.find_by_event_date_after(noon()).await.unwrap()), vec!["future"]);
        assert_eq!(names(repo.find_by_event_date_before(noon()).await.unwrap()), vec!["past"]);
    }

    #[tokio::test]
    async fn test_between_is_inclusive() {
        let repo = seeded().await;

        let found = repo.find_by_event_date_between(noon(), noon()).await.unwrap();
        assert_eq!(names(found), vec!["now"]);
    }

    #[tokio::test]
    async fn test_before_and_active_skips_archived() {
        let repo = seeded().await;
        let mut archived = Event::new("old", "desc", noon() - Duration::days(60));
        archived.active = false;
        repo.save(archived).await.unwrap();

        let found = repo
            .find_by_event_date_before_and_active_true(noon())
            .await
            .unwrap();
        assert_eq!(names(found), vec!["past"]);
    }

    #[tokio::test]
    async fn test_name_exists_and_delete() {
        let repo = seeded().await;
        assert!(repo.exists_by_name("past").await.unwrap());
        assert!(!repo.exists_by_name("Past").await.unwrap());

        repo.delete_by_id(1).await.unwrap();
        assert!(!repo.exists_by_id(1).await.unwrap());
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }
}
