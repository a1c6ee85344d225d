//! DevHub API: REST backend for developers, their projects and the technologies they use.

pub mod catalog;
pub mod config;
pub mod error;
pub mod extractors;
pub mod guards;
pub mod handlers;
pub mod messages;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StoreKind};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::app;
pub use state::AppState;
pub use store::{connect, ensure_database_exists, MemoryStore, PgStore, Store};
