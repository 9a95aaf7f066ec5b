use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::PlayerResult,
    models::Player,
    repository::PlayerRepository,
};

/// PostgreSQL-backed [`PlayerRepository`]
#[derive(Clone)]
pub struct PgPlayerRepository {
    db: DatabaseConnection,
}

impl PgPlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn all_where(&self, condition: sea_orm::Condition) -> PlayerResult<Vec<Player>> {
        let models = entity::Entity::find()
            .filter(condition)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PlayerRepository for PgPlayerRepository {
    async fn find_all(&self) -> PlayerResult<Vec<Player>> {
        self.all_where(sea_orm::Condition::all()).await
    }

    async fn find_by_id(&self, id: i64) -> PlayerResult<Option<Player>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> PlayerResult<Option<Player>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn save(&self, player: Player) -> PlayerResult<Player> {
        let is_new = player.id.is_none();
        let active_model: entity::ActiveModel = player.into();

        let model = if is_new {
            active_model.insert(&self.db).await?
        } else {
            active_model.update(&self.db).await?
        };

        tracing::info!(player_id = model.id, inserted = is_new, "Saved player");
        Ok(model.into())
    }

    async fn exists_by_id(&self, id: i64) -> PlayerResult<bool> {
        Ok(entity::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }

    async fn delete_by_id(&self, id: i64) -> PlayerResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::info!(player_id = id, rows = result.rows_affected, "Deleted player");
        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> PlayerResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn exists_by_jersey_number_and_team_name(
        &self,
        jersey_number: i32,
        team_name: &str,
    ) -> PlayerResult<bool> {
        let found = entity::Entity::find()
            .filter(entity::Column::JerseyNumber.eq(jersey_number))
            .filter(entity::Column::TeamName.eq(team_name))
            .one(&self.db)
            .await?;
        Ok(found.is_some())
    }

    async fn find_by_team_name(&self, team_name: &str) -> PlayerResult<Vec<Player>> {
        self.all_where(sea_orm::Condition::all().add(entity::Column::TeamName.eq(team_name)))
            .await
    }

    async fn count_by_team_name(&self, team_name: &str) -> PlayerResult<u64> {
        let count = entity::Entity::find()
            .filter(entity::Column::TeamName.eq(team_name))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn find_by_position(&self, position: &str) -> PlayerResult<Vec<Player>> {
        let condition = Expr::cust_with_values("LOWER(position) = $1", [position.to_lowercase()]);
        self.all_where(sea_orm::Condition::all().add(condition)).await
    }

    async fn find_by_age_between(&self, min_age: i32, max_age: i32) -> PlayerResult<Vec<Player>> {
        self.all_where(sea_orm::Condition::all().add(entity::Column::Age.between(min_age, max_age)))
            .await
    }

    async fn find_by_active(&self, active: bool) -> PlayerResult<Vec<Player>> {
        self.all_where(sea_orm::Condition::all().add(entity::Column::Active.eq(active)))
            .await
    }

    async fn count_by_active(&self, active: bool) -> PlayerResult<u64> {
        let count = entity::Entity::find()
            .filter(entity::Column::Active.eq(active))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn find_by_full_name_containing(&self, fragment: &str) -> PlayerResult<Vec<Player>> {
        let pattern = format!("%{}%", fragment.to_lowercase());
        let condition = Expr::cust_with_values(
            "LOWER(CONCAT(first_name, ' ', last_name)) LIKE $1",
            [pattern],
        );
        self.all_where(sea_orm::Condition::all().add(condition)).await
    }

    async fn find_with_salary_above(&self, min_salary: f64) -> PlayerResult<Vec<Player>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Salary.gt(min_salary))
            .order_by_desc(entity::Column::Salary)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
