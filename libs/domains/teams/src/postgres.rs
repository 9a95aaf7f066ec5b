use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::{entity, error::TeamResult, models::Team, repository::TeamRepository};

#[derive(Clone)]
pub struct PgTeamRepository {
    db: DatabaseConnection,
}

impl PgTeamRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn find_all(&self) -> TeamResult<Vec<Team>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> TeamResult<Option<Team>> {
        Ok(entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn save(&self, team: Team) -> TeamResult<Team> {
        let is_new = team.id.is_none();
        let active_model: entity::ActiveModel = team.into();

        let model = if is_new {
            active_model.insert(&self.db).await?
        } else {
            active_model.update(&self.db).await?
        };

        tracing::info!(team_id = model.id, inserted = is_new, "Saved team");
        Ok(model.into())
    }

    async fn exists_by_id(&self, id: i64) -> TeamResult<bool> {
        Ok(entity::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }

    async fn delete_by_id(&self, id: i64) -> TeamResult<()> {
        entity::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::info!(team_id = id, "Deleted team");
        Ok(())
    }

    async fn exists_by_name(&self, name: &str) -> TeamResult<bool> {
        let found = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(found.is_some())
    }

    async fn find_by_region(&self, region: &str) -> TeamResult<Vec<Team>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Region.eq(region))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_active_true(&self) -> TeamResult<Vec<Team>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Active.eq(true))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> TeamResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }
}
