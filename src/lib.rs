//! Item and bill CRUD service: HTTP handlers over parameterized SQL, with a bootstrapper that
//! waits for PostgreSQL and creates the tables.

pub mod bootstrap;
pub mod codec;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use bootstrap::initialize;
pub use config::{load_from_env, AppConfig, DbConfig};
pub use error::{AppError, BootstrapError, CodecError};
pub use model::{Bill, Item, Resource};
pub use routes::{app, docs_routes, resource_routes};
pub use service::{PgBillRepository, PgItemRepository, Repository};
pub use state::AppState;
