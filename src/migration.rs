//! Schema bootstrap for the products table.

use sqlx::PgPool;

use crate::error::AppError;

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        price DOUBLE PRECISION NOT NULL CHECK (price > 0),
        availability BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Create the products table if it does not exist. Idempotent; existing rows are untouched.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(CREATE_PRODUCTS).execute(pool).await?;
    Ok(())
}

/// Drop and recreate the products table, discarding every row and restarting ids at 1.
pub async fn reset_products(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("DROP TABLE IF EXISTS products").execute(&mut *tx).await?;
    sqlx::query(CREATE_PRODUCTS).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}
