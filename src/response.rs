//! Standard response envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{Product, ProductSummary};

pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
pub const PRODUCT_UPDATED: &str = "Producto actualizado";
pub const PRODUCT_DELETED: &str = "Producto eliminado";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const BODY_TOO_LARGE: &str = "Payload Too Large";

#[derive(Serialize, ToSchema, Debug)]
pub struct ProductBody {
    pub data: Product,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ProductListBody {
    pub data: Vec<ProductSummary>,
}

/// A product together with a human-readable outcome.
#[derive(Serialize, ToSchema, Debug)]
pub struct ProductUpdatedBody {
    pub data: Product,
    pub message: String,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: &str) -> Self {
        MessageBody {
            message: message.to_string(),
        }
    }
}

/// Liveness and readiness report. `database` is only set by readiness.
#[derive(Serialize, ToSchema, Debug)]
pub struct StatusBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct VersionBody {
    pub name: &'static str,
    pub version: &'static str,
}

pub fn live() -> Json<StatusBody> {
    Json(StatusBody {
        status: "ok",
        database: None,
    })
}

/// 200 when the store answered, 503 otherwise.
pub fn readiness(store_up: bool) -> (StatusCode, Json<StatusBody>) {
    if store_up {
        (
            StatusCode::OK,
            Json(StatusBody {
                status: "ok",
                database: Some("ok"),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(StatusBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        )
    }
}

pub fn package_version() -> Json<VersionBody> {
    Json(VersionBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn product_created(data: Product) -> (StatusCode, Json<ProductBody>) {
    (StatusCode::CREATED, Json(ProductBody { data }))
}

pub fn product_ok(data: Product) -> (StatusCode, Json<ProductBody>) {
    (StatusCode::OK, Json(ProductBody { data }))
}

pub fn product_updated(data: Product) -> (StatusCode, Json<ProductUpdatedBody>) {
    (
        StatusCode::OK,
        Json(ProductUpdatedBody {
            data,
            message: PRODUCT_UPDATED.to_string(),
        }),
    )
}

pub fn product_list(data: Vec<ProductSummary>) -> (StatusCode, Json<ProductListBody>) {
    (StatusCode::OK, Json(ProductListBody { data }))
}

pub fn message(message: &str) -> (StatusCode, Json<MessageBody>) {
    (StatusCode::OK, Json(MessageBody::new(message)))
}
