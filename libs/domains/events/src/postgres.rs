use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_players::{Player, entity as player_entity};
use domain_teams::{Team, entity as team_entity};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::collections::{BTreeSet, HashMap};

use crate::{
    entity,
    error::{EventError, EventResult},
    models::Event,
    repository::EventRepository,
};

/// PostgreSQL-backed [`EventRepository`]. Reads load the referenced teams
/// and their current rosters.
#[derive(Clone)]
pub struct PgEventRepository {
    db: DatabaseConnection,
}

impl PgEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn query(&self, condition: Condition) -> EventResult<Vec<Event>> {
        let models = entity::Entity::find()
            .filter(condition)
            .order_by_asc(entity::Column::EventDate)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        self.hydrate(models).await
    }

    async fn hydrate(&self, models: Vec<entity::Model>) -> EventResult<Vec<Event>> {
        let team_ids: BTreeSet<i64> = models
            .iter()
            .flat_map(|m| [m.team_a_id, m.team_b_id])
            .flatten()
            .collect();

        let teams = if team_ids.is_empty() {
            HashMap::new()
        } else {
            self.load_teams(team_ids).await?
        };

        Ok(models
            .into_iter()
            .map(|model| to_event(model, &teams))
            .collect())
    }

    async fn load_teams(&self, ids: BTreeSet<i64>) -> EventResult<HashMap<i64, Team>> {
        let team_models = team_entity::Entity::find()
            .filter(team_entity::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        let names: Vec<String> = team_models.iter().map(|t| t.name.clone()).collect();
        let player_models = player_entity::Entity::find()
            .filter(player_entity::Column::TeamName.is_in(names))
            .order_by_asc(player_entity::Column::Id)
            .all(&self.db)
            .await?;

        let mut rosters: HashMap<String, Vec<Player>> = HashMap::new();
        for model in player_models {
            if let Some(team_name) = model.team_name.clone() {
                rosters.entry(team_name).or_default().push(model.into());
            }
        }

        Ok(team_models
            .into_iter()
            .map(|model| {
                let id = model.id;
                let mut team: Team = model.into();
                team.players = rosters.remove(&team.name).unwrap_or_default();
                (id, team)
            })
            .collect())
    }
}

fn to_event(model: entity::Model, teams: &HashMap<i64, Team>) -> Event {
    let event_id = model.id;
    let lookup = |id: Option<i64>| {
        let id = id?;
        let team = teams.get(&id).cloned();
        if team.is_none() {
            tracing::warn!(event_id, team_id = id, "Referenced team no longer exists");
        }
        team
    };
    let team_a = lookup(model.team_a_id);
    let team_b = lookup(model.team_b_id);

    Event {
        id: Some(model.id),
        team_a,
        team_b,
        name: model.name,
        description: model.description,
        event_date: Some(model.event_date.with_timezone(&Utc)),
        active: model.active,
        canceled: model.canceled,
        city: model.city,
    }
}

fn team_id(team: Option<&Team>) -> EventResult<Option<i64>> {
    match team {
        None => Ok(None),
        Some(team) => team.id.map(Some).ok_or_else(|| {
            EventError::validation(format!(
                "Team {} must be saved before an event can reference it",
                team.name
            ))
        }),
    }
}

fn to_active_model(event: &Event) -> EventResult<entity::ActiveModel> {
    let event_date = event
        .event_date
        .ok_or_else(|| EventError::validation("Event date is required"))?;

    Ok(entity::ActiveModel {
        id: event.id.map_or(NotSet, Set),
        name: Set(event.name.clone()),
        description: Set(event.description.clone()),
        event_date: Set(event_date.into()),
        active: Set(event.active),
        canceled: Set(event.canceled),
        team_a_id: Set(team_id(event.team_a.as_ref())?),
        team_b_id: Set(team_id(event.team_b.as_ref())?),
        city: Set(event.city.clone()),
    })
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn find_all(&self) -> EventResult<Vec<Event>> {
        self.query(Condition::all()).await
    }

    async fn find_by_id(&self, id: i64) -> EventResult<Option<Event>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![model]).await?.pop())
    }

    async fn save(&self, mut event: Event) -> EventResult<Event> {
        let active_model = to_active_model(&event)?;
        let is_new = event.id.is_none();

        let model = if is_new {
            active_model.insert(&self.db).await?
        } else {
            active_model.update(&self.db).await?
        };

        tracing::info!(event_id = model.id, inserted = is_new, "Saved event");
        event.id = Some(model.id);
        Ok(event)
    }

    async fn exists_by_name(&self, name: &str) -> EventResult<bool> {
        let found = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(found.is_some())
    }

    async fn exists_by_id(&self, id: i64) -> EventResult<bool> {
        Ok(entity::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }

    async fn delete_by_id(&self, id: i64) -> EventResult<()> {
        entity::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::info!(event_id = id, "Deleted event");
        Ok(())
    }

    async fn find_by_event_date_after(&self, at: DateTime<Utc>) -> EventResult<Vec<Event>> {
        self.query(Condition::all().add(entity::Column::EventDate.gt(at)))
            .await
    }

    async fn find_by_event_date_before(&self, at: DateTime<Utc>) -> EventResult<Vec<Event>> {
        self.query(Condition::all().add(entity::Column::EventDate.lt(at)))
            .await
    }

    async fn find_by_active_true(&self) -> EventResult<Vec<Event>> {
        self.query(Condition::all().add(entity::Column::Active.eq(true)))
            .await
    }

    async fn find_by_event_date_before_and_active_true(
        &self,
        at: DateTime<Utc>,
    ) -> EventResult<Vec<Event>> {
        self.query(
            Condition::all()
                .add(entity::Column::EventDate.lt(at))
                .add(entity::Column::Active.eq(true)),
        )
        .await
    }

    async fn find_by_event_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EventResult<Vec<Event>> {
        self.query(Condition::all().add(entity::Column::EventDate.between(start, end)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn event_model(team_a_id: Option<i64>, team_b_id: Option<i64>) -> entity::Model {
        entity::Model {
            id: 1,
            name: "Grande Finale".into(),
            description: "Season final".into(),
            event_date: Utc.with_ymd_and_hms(2025, 7, 1, 20, 0, 0).unwrap().into(),
            active: true,
            canceled: false,
            team_a_id,
            team_b_id,
            city: Some("Paris".into()),
        }
    }

    fn team_model(id: i64, name: &str) -> team_entity::Model {
        let now = Utc::now().into();
        team_entity::Model {
            id,
            name: name.into(),
            region: "EU".into(),
            founded_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            contact_email: None,
            phone_number: None,
            budget: None,
            wins: 0,
            losses: 0,
            active: true,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn player_model(id: i64, first: &str, team: &str) -> player_entity::Model {
        let now = Utc::now().into();
        player_entity::Model {
            id,
            first_name: first.into(),
            last_name: "Test".into(),
            email: format!("{}@arena.test", first.to_lowercase()),
            age: 25,
            position: "Attacker".into(),
            team_name: Some(team.into()),
            jersey_number: None,
            salary: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_hydrates_teams_and_rosters() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![event_model(Some(10), Some(20))]])
            .append_query_results([vec![team_model(10, "Dragons"), team_model(20, "Phoenix")]])
            .append_query_results([vec![
                player_model(1, "Alice", "Dragons"),
                player_model(2, "Charlie", "Phoenix"),
                player_model(3, "Dave", "Phoenix"),
            ]])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let event = repo.find_by_id(1).await.unwrap().unwrap();
        let team_a = event.team_a.unwrap();
        let team_b = event.team_b.unwrap();

        assert_eq!(team_a.name, "Dragons");
        assert_eq!(team_a.players.len(), 1);
        assert_eq!(team_b.players.len(), 2);
        assert_eq!(event.city.as_deref(), Some("Paris"));
    }

    #[tokio::test]
    async fn test_deleted_team_leaves_its_side_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![event_model(Some(10), Some(20))]])
            .append_query_results([vec![team_model(10, "Dragons")]])
            .append_query_results([vec![player_model(1, "Alice", "Dragons")]])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let event = repo.find_by_id(1).await.unwrap().unwrap();

        assert_eq!(event.team_a.unwrap().name, "Dragons");
        assert!(event.team_b.is_none());
    }

    #[tokio::test]
    async fn test_events_without_teams_skip_team_queries() {
        // only one result set queued; a team lookup would fail
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![event_model(None, None)]])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let events = repo.find_by_active_true().await.unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].team_a.is_none());
    }

    #[test]
    fn test_unsaved_team_cannot_be_referenced() {
        let team = Team::new("Dragons", "EU", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        let event = Event::new("Finale", "desc", Utc::now()).with_teams(team.clone(), team);

        let err = to_active_model(&event).unwrap_err();
        assert!(err.to_string().contains("must be saved"));
    }
}
