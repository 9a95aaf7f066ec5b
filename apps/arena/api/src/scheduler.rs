//! Periodic archival of stale events.

use domain_events::{EventRepository, EventService};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{error, info};

use crate::config::ArchiveConfig;

/// Runs one archival pass. Failures are logged, never propagated, so a bad
/// run does not stop later ones.
pub async fn run_archive<R: EventRepository>(service: &EventService<R>) -> Option<usize> {
    match service.archive_old_events().await {
        Ok(archived) => {
            info!(archived, "Scheduled archival finished");
            Some(archived)
        }
        Err(e) => {
            error!(error = %e, "Scheduled archival failed");
            None
        }
    }
}

/// Builds the cron job. An invalid expression is rejected here.
pub fn archive_job<R>(service: Arc<EventService<R>>, cron: &str) -> Result<Job, JobSchedulerError>
where
    R: EventRepository + 'static,
{
    Job::new_async(cron, move |_uuid, _lock| {
        let service = Arc::clone(&service);
        Box::pin(async move {
            run_archive(&service).await;
        })
    })
}

/// Starts a scheduler running [`archive_job`] on `config.cron`.
///
/// The returned scheduler must be shut down by the caller.
pub async fn start<R>(
    service: Arc<EventService<R>>,
    config: &ArchiveConfig,
) -> Result<JobScheduler, JobSchedulerError>
where
    R: EventRepository + 'static,
{
    let scheduler = JobScheduler::new().await?;
    scheduler.add(archive_job(service, &config.cron)?).await?;
    scheduler.start().await?;

    info!(cron = %config.cron, "Archival scheduler started");
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use domain_events::{Event, FixedClock, InMemoryEventRepository};

    async fn service() -> EventService<InMemoryEventRepository> {
        let now = Utc.with_ymd_and_hms(2025, 6, 19, 10, 0, 0).unwrap();
        let repository = InMemoryEventRepository::new();
        for (name, days) in [("Spring Cup", 45), ("Summer Cup", 5)] {
            repository
                .save(Event::new(name, "Group stage", now - Duration::days(days)))
                .await
                .unwrap();
        }
        EventService::with_clock(repository, Arc::new(FixedClock::new(now)))
    }

    #[tokio::test]
    async fn test_run_archive_reports_count() {
        let service = service().await;

        assert_eq!(run_archive(&service).await, Some(1));
        assert_eq!(run_archive(&service).await, Some(0));
    }

    #[tokio::test]
    async fn test_archive_job_rejects_bad_cron() {
        let service = Arc::new(service().await);
        assert!(archive_job(Arc::clone(&service), "every night").is_err());
        assert!(archive_job(service, "0 0 3 * * *").is_ok());
    }
}
