//! Product entity, its list projection and the typed request input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{AppError, FieldError, Location};
use crate::service::validation::{coerce_bool, coerce_number, coerce_text};

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The product ID
    #[schema(example = 1)]
    pub id: i32,
    /// The product name
    #[schema(example = "Laptop")]
    pub name: String,
    /// The product price
    #[schema(example = 1000)]
    pub price: f64,
    /// The product availability
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The columns returned by the product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ProductSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Laptop")]
    pub name: String,
    #[schema(example = 1000)]
    pub price: f64,
    pub availability: bool,
}

impl From<Product> for ProductSummary {
    fn from(p: Product) -> Self {
        ProductSummary {
            id: p.id,
            name: p.name,
            price: p.price,
            availability: p.availability,
        }
    }
}

/// Fields for inserting a product. The store assigns `id` and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

/// Body accepted by create and full update.
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct ProductInput {
    #[schema(example = "Laptop")]
    pub name: String,
    #[schema(example = 1000)]
    pub price: f64,
    /// Omitted on create means available; omitted on update keeps the stored value.
    #[schema(example = true)]
    pub availability: Option<bool>,
}

impl ProductInput {
    /// Build the typed input from a body that already passed the product rules.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        let invalid = |field: &str, msg: &str| {
            AppError::Validation(vec![FieldError::field(field, Location::Body, body.get(field), msg)])
        };
        let name = body
            .get("name")
            .and_then(coerce_text)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| invalid("name", "Ingresa un nombre"))?;
        let price = body
            .get("price")
            .and_then(coerce_number)
            .filter(|n| *n > 0.0)
            .ok_or_else(|| invalid("price", "El precio debe ser mayor a 0"))?;
        let availability = match body.get("availability") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                coerce_bool(v).ok_or_else(|| invalid("availability", "La disponibilidad debe ser un booleano"))?,
            ),
        };
        Ok(ProductInput {
            name,
            price,
            availability,
        })
    }

    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            price: self.price,
            availability: self.availability.unwrap_or(true),
        }
    }
}
