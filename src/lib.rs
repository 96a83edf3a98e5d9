//! Products bridge: REST routes for the `products` table, with a persist step
//! that commits each write or, on request, forces it to roll back.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use model::{Product, ProductInput};
pub use response::WriteAck;
pub use routes::{app, common_routes, product_routes};
pub use service::{Persist, ProductService};
pub use state::AppState;
pub use store::{Datastore, MemoryStore, Outcome, PgStore};
