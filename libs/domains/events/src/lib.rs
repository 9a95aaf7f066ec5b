//! Events Domain
//!
//! Scheduling of matches between two teams and the rules around them:
//! validation, unique names, cancellation notice, age-based archival and
//! teaser text.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐      ┌────────────┐
//! │  Handlers   │ ───► │ TeamLookup │  ← team ids → teams with rosters
//! └──────┬──────┘      └────────────┘
//!        │
//! ┌──────▼──────┐      ┌────────────┐
//! │   Service   │ ───► │   Clock    │  ← "now" for archive/cancel/today
//! └──────┬──────┘      └────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← In-memory or PostgreSQL
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_events::{handlers, EventService, InMemoryEventRepository, TeamLookup};
//! use domain_players::InMemoryPlayerRepository;
//! use domain_teams::{InMemoryTeamRepository, TeamService};
//!
//! let players = Arc::new(InMemoryPlayerRepository::new());
//! let teams: Arc<dyn TeamLookup> =
//!     Arc::new(TeamService::new(InMemoryTeamRepository::new(), players));
//! let events = Arc::new(EventService::new(InMemoryEventRepository::new()));
//! let router = handlers::router(events, teams);
//! ```

pub mod clock;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod team_lookup;
pub mod teaser;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{EventError, EventResult};
pub use models::{ArchiveResponse, Event, EventRequest, TeaserResponse};
pub use postgres::PgEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::{EventService, validate_event, validate_event_request};
pub use team_lookup::TeamLookup;
pub use teaser::generate_teaser;
