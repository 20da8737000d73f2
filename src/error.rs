//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use crate::response::{MessageBody, BODY_TOO_LARGE, INTERNAL_SERVER_ERROR, PRODUCT_NOT_FOUND};

pub const MALFORMED_BODY: &str = "El cuerpo de la petición no es JSON válido";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed: {} error(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("request body exceeds the size limit")]
    BodyTooLarge,
    #[error("product not found")]
    NotFound,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Where a validated value came from.
#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// One failed check, shaped like the error entries API clients already consume.
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct FieldError {
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub location: Location,
}

impl FieldError {
    pub fn field(path: &str, location: Location, value: Option<&Value>, msg: &str) -> Self {
        FieldError {
            kind: "field",
            value: value.cloned(),
            msg: msg.to_string(),
            path: Some(path.to_string()),
            location,
        }
    }

    fn body(msg: &str) -> Self {
        FieldError {
            kind: "body",
            value: None,
            msg: msg.to_string(),
            path: None,
            location: Location::Body,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationErrorBody { errors })).into_response()
            }
            AppError::MalformedBody(reason) => {
                tracing::debug!(%reason, "rejected request body");
                let errors = vec![FieldError::body(MALFORMED_BODY)];
                (StatusCode::BAD_REQUEST, Json(ValidationErrorBody { errors })).into_response()
            }
            AppError::BodyTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, Json(MessageBody::new(BODY_TOO_LARGE))).into_response()
            }
            AppError::NotFound | AppError::Db(sqlx::Error::RowNotFound) => {
                (StatusCode::NOT_FOUND, Json(MessageBody::new(PRODUCT_NOT_FOUND))).into_response()
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageBody::new(INTERNAL_SERVER_ERROR)),
                )
                    .into_response()
            }
        }
    }
}
