//! Shared application state.
//!
//! Repositories are thin wrappers over the pooled connection, so the services
//! are built once here and shared by the routers and the archival job.

use database::postgres::DatabaseConnection;
use domain_events::{EventService, PgEventRepository};
use domain_players::PgPlayerRepository;
use domain_teams::{PgTeamRepository, TeamService};
use std::sync::Arc;

use crate::config::Config;

pub type Teams = TeamService<PgTeamRepository, PgPlayerRepository>;
pub type Events = EventService<PgEventRepository>;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// Shared by the player routes and the team roster lookups
    pub players: Arc<PgPlayerRepository>,
    /// Also resolves team ids for event requests
    pub teams: Arc<Teams>,
    pub events: Arc<Events>,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        let players = Arc::new(PgPlayerRepository::new(db.clone()));
        let teams = Arc::new(TeamService::new(
            PgTeamRepository::new(db.clone()),
            Arc::clone(&players),
        ));
        let events = Arc::new(EventService::new(PgEventRepository::new(db.clone())));

        Self {
            config,
            db,
            players,
            teams,
            events,
        }
    }
}
