//! Product API: a REST backend exposing CRUD over a PostgreSQL `products` table.

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;
pub mod store;
#[cfg(test)]
mod test_helpers;

pub use config::Config;
pub use docs::ApiDoc;
pub use error::AppError;
pub use migration::{apply_migrations, reset_products};
pub use model::{NewProduct, Product, ProductInput, ProductSummary};
pub use server::{build_app, connect_database, shutdown_signal};
pub use state::AppState;
pub use store::{PgProductStore, ProductStore};
