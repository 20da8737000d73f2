//! Persistence gateway for products.

mod postgres;
pub use postgres::PgProductStore;

use async_trait::async_trait;

use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductInput, ProductSummary};

/// CRUD primitives over the products table. Methods that address a row return `None` when it does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// First `limit` products by ascending id.
    async fn list(&self, limit: i64) -> Result<Vec<ProductSummary>, AppError>;

    async fn find(&self, id: i32) -> Result<Option<Product>, AppError>;

    async fn create(&self, product: NewProduct) -> Result<Product, AppError>;

    /// Replace name and price; availability only when given.
    async fn update(&self, id: i32, input: ProductInput) -> Result<Option<Product>, AppError>;

    /// Negate the stored availability.
    async fn toggle_availability(&self, id: i32) -> Result<Option<Product>, AppError>;

    /// `true` when a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
