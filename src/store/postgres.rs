//! `ProductStore` over PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use super::ProductStore;
use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductInput, ProductSummary};

const PRODUCT_COLUMNS: &str = "id, name, price, availability, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        PgProductStore { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self, limit: i64) -> Result<Vec<ProductSummary>, AppError> {
        let sql = "SELECT id, name, price, availability FROM products ORDER BY id ASC LIMIT $1";
        tracing::debug!(sql = %sql, limit, "query");
        let rows = sqlx::query_as::<_, ProductSummary>(sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO products (name, price, availability) VALUES ($1, $2, $3) RETURNING {}",
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, name = %product.name, price = product.price, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.availability)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, input: ProductInput) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "UPDATE products SET name = $2, price = $3, availability = COALESCE($4, availability), updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.availability)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn toggle_availability(&self, id: i32) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "UPDATE products SET availability = NOT availability, updated_at = NOW() WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let sql = "DELETE FROM products WHERE id = $1 RETURNING id";
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<(i32,)> = sqlx::query_as(sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
