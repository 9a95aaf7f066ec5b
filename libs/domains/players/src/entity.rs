use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Player;

/// Sea-ORM entity for the `players` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: i32,
    pub position: String,
    pub team_name: Option<String>,
    pub jersey_number: Option<i32>,
    pub salary: Option<f64>,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Player {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            age: model.age,
            position: model.position,
            team_name: model.team_name,
            jersey_number: model.jersey_number,
            salary: model.salary,
            active: model.active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// A player without an id becomes an insert
impl From<Player> for ActiveModel {
    fn from(player: Player) -> Self {
        ActiveModel {
            id: player.id.map_or(NotSet, Set),
            first_name: Set(player.first_name),
            last_name: Set(player.last_name),
            email: Set(player.email),
            age: Set(player.age),
            position: Set(player.position),
            team_name: Set(player.team_name),
            jersey_number: Set(player.jersey_number),
            salary: Set(player.salary),
            active: Set(player.active),
            created_at: Set(player.created_at.into()),
            updated_at: Set(player.updated_at.into()),
        }
    }
}
