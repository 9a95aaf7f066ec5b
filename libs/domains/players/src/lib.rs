//! Players Domain
//!
//! Player registration with email and per-team jersey uniqueness, search
//! queries and active/inactive status.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under /players
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, uniqueness rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← In-memory or PostgreSQL
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_players::{handlers, InMemoryPlayerRepository, PlayerService};
//!
//! let service = PlayerService::new(InMemoryPlayerRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{PlayerError, PlayerResult};
pub use models::{Player, PlayerRequest};
pub use postgres::PgPlayerRepository;
pub use repository::{InMemoryPlayerRepository, PlayerRepository};
pub use service::{PlayerService, validate_player};
