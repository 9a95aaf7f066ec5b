//! Teams Domain
//!
//! Team CRUD with unique names, region and active queries. A team's roster
//! is read from the player store by team name.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_players::InMemoryPlayerRepository;
//! use domain_teams::{handlers, InMemoryTeamRepository, TeamService};
//!
//! let players = Arc::new(InMemoryPlayerRepository::new());
//! let service = Arc::new(TeamService::new(InMemoryTeamRepository::new(), players));
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{TeamError, TeamResult};
pub use models::{Team, TeamRequest};
pub use postgres::PgTeamRepository;
pub use repository::{InMemoryTeamRepository, TeamRepository};
pub use service::{TeamService, validate_team};
