use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Team;

/// Sea-ORM entity for the `teams` table. Rosters are not stored here; they
/// are the `players` rows whose `team_name` matches.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub region: String,
    pub founded_date: Option<Date>,
    pub contact_email: Option<String>,
    pub phone_number: Option<String>,
    pub budget: Option<f64>,
    pub wins: i32,
    pub losses: i32,
    pub active: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Team {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            region: model.region,
            founded_date: model.founded_date,
            contact_email: model.contact_email,
            phone_number: model.phone_number,
            budget: model.budget,
            wins: model.wins,
            losses: model.losses,
            active: model.active,
            description: model.description,
            players: Vec::new(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Team> for ActiveModel {
    fn from(team: Team) -> Self {
        ActiveModel {
            id: team.id.map_or(NotSet, Set),
            name: Set(team.name),
            region: Set(team.region),
            founded_date: Set(team.founded_date),
            contact_email: Set(team.contact_email),
            phone_number: Set(team.phone_number),
            budget: Set(team.budget),
            wins: Set(team.wins),
            losses: Set(team.losses),
            active: Set(team.active),
            description: Set(team.description),
            created_at: Set(team.created_at.into()),
            updated_at: Set(team.updated_at.into()),
        }
    }
}
