use chrono::{Duration, NaiveTime};
use std::sync::Arc;
use tracing::instrument;

use crate::clock::{Clock, SystemClock};
use crate::error::{EventError, EventResult};
use crate::models::{Event, EventRequest};
use crate::repository::EventRepository;
use crate::teaser;

/// Events older than this are deactivated by [`EventService::archive_old_events`]
pub const ARCHIVE_AFTER_DAYS: i64 = 30;

/// Cancellation is refused when the event starts sooner than this
pub const CANCELLATION_NOTICE_HOURS: i64 = 24;

/// Event lifecycle rules on top of an [`EventRepository`].
///
/// Every time-dependent operation reads "now" from the injected [`Clock`].
#[derive(Clone)]
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: Arc::new(repository),
            clock,
        }
    }

    pub async fn get_all_events(&self) -> EventResult<Vec<Event>> {
        self.repository.find_all().await
    }

    pub async fn get_event_by_id(&self, id: i64) -> EventResult<Event> {
        check_id(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    #[instrument(skip(self, event), fields(name = %event.name))]
    pub async fn create_event(&self, event: Event) -> EventResult<Event> {
        validate_event(Some(&event))?;

        if self.repository.exists_by_name(&event.name).await? {
            return Err(EventError::DuplicateName(event.name));
        }

        let saved = self.repository.save(event).await?;
        tracing::info!(event_id = ?saved.id, "Created event");
        Ok(saved)
    }

    /// Replaces every field but `id` and `canceled`. Name uniqueness is left
    /// to the store's unique index.
    #[instrument(skip(self, data))]
    pub async fn update_event(&self, id: i64, data: Event) -> EventResult<Event> {
        let mut existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))?;

        validate_event(Some(&data))?;

        existing.name = data.name;
        existing.description = data.description;
        existing.event_date = data.event_date;
        existing.active = data.active;
        existing.team_a = data.team_a;
        existing.team_b = data.team_b;
        existing.city = data.city;

        let saved = self.repository.save(existing).await?;
        tracing::info!(event_id = id, "Updated event");
        Ok(saved)
    }

    /// `NotFound` unless an event with `id` is stored.
    pub async fn ensure_exists(&self, id: i64) -> EventResult<()> {
        if self.repository.exists_by_id(id).await? {
            Ok(())
        } else {
            Err(EventError::NotFound(id))
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: i64) -> EventResult<()> {
        self.ensure_exists(id).await?;
        self.repository.delete_by_id(id).await?;
        tracing::info!(event_id = id, "Deleted event");
        Ok(())
    }

    pub async fn get_upcoming_events(&self) -> EventResult<Vec<Event>> {
        self.repository
            .find_by_event_date_after(self.clock.now())
            .await
    }

    pub async fn get_past_events(&self) -> EventResult<Vec<Event>> {
        self.repository
            .find_by_event_date_before(self.clock.now())
            .await
    }

    pub async fn get_active_events(&self) -> EventResult<Vec<Event>> {
        self.repository.find_by_active_true().await
    }

    /// Events between 00:00:00 and 23:59:59 of the current UTC day
    pub async fn get_todays_events(&self) -> EventResult<Vec<Event>> {
        let start = self.clock.now().date_naive().and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1) - Duration::seconds(1);

        self.repository.find_by_event_date_between(start, end).await
    }

    /// Deactivates active events dated more than 30 days ago. Running it again
    /// finds nothing left to archive.
    #[instrument(skip(self))]
    pub async fn archive_old_events(&self) -> EventResult<usize> {
        let cutoff = self.clock.now() - Duration::days(ARCHIVE_AFTER_DAYS);
        let stale = self
            .repository
            .find_by_event_date_before_and_active_true(cutoff)
            .await?;

        let count = stale.len();
        for mut event in stale {
            event.active = false;
            self.repository.save(event).await?;
        }

        tracing::info!(archived = count, %cutoff, "Archived old events");
        Ok(count)
    }

    #[instrument(skip(self))]
    pub async fn cancel_event(&self, id: i64) -> EventResult<Event> {
        let mut event = self.get_event_by_id(id).await?;

        let event_date = event
            .event_date
            .ok_or_else(|| EventError::validation("Event date is required"))?;
        if event_date - self.clock.now() < Duration::hours(CANCELLATION_NOTICE_HOURS) {
            tracing::warn!(event_id = id, %event_date, "Cancellation refused inside notice window");
            return Err(EventError::CancellationWindow);
        }

        event.canceled = true;
        let saved = self.repository.save(event).await?;
        tracing::info!(event_id = id, "Canceled event");
        Ok(saved)
    }

    pub fn generate_teaser(&self, event: &Event) -> EventResult<String> {
        teaser::generate_teaser(event)
    }
}

fn check_id(id: i64) -> EventResult<()> {
    if id <= 0 {
        return Err(EventError::validation("Event ID must be positive"));
    }
    Ok(())
}

/// Business rules shared by create and update, first failure wins.
pub fn validate_event(event: Option<&Event>) -> EventResult<()> {
    let Some(event) = event else {
        return Err(EventError::validation("Event cannot be null"));
    };

    check_fields(
        &event.name,
        &event.description,
        event.event_date.is_some(),
        (event.team_a.is_some(), event.team_b.is_some()),
    )
}

/// [`validate_event`] on a request whose teams are still ids, so rule
/// failures win over team lookups.
pub fn validate_event_request(request: &EventRequest) -> EventResult<()> {
    check_fields(
        &request.name,
        &request.description,
        request.event_date.is_some(),
        (request.team_a_id.is_some(), request.team_b_id.is_some()),
    )
}

fn check_fields(
    name: &str,
    description: &str,
    has_date: bool,
    (has_team_a, has_team_b): (bool, bool),
) -> EventResult<()> {
    if name.trim().is_empty() {
        return Err(EventError::validation("Event name is required"));
    }
    if description.trim().is_empty() {
        return Err(EventError::validation("Event description is required"));
    }
    if !has_date {
        return Err(EventError::validation("Event date is required"));
    }
    if has_team_a != has_team_b {
        return Err(EventError::validation("Both teamA and teamB are required"));
    }
    if name.trim().chars().count() < 2 {
        return Err(EventError::validation(
            "Event name must be between 2 and 100 characters",
        ));
    }

    Ok(())
}
