//! Test helpers: router builders and an in-memory store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductInput, ProductSummary};
use crate::server::build_app;
use crate::state::AppState;
use crate::store::{MockProductStore, ProductStore};

pub(crate) const TEST_ORIGIN: &str = "http://localhost:5173";

pub(crate) type HelperResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn test_config() -> Config {
    Config {
        frontend_url: Some(TEST_ORIGIN.into()),
        ..Config::default()
    }
}

pub(crate) fn mock_app(store: MockProductStore) -> Router {
    build_app(AppState::new(store), &test_config())
}

pub(crate) fn memory_app() -> Router {
    build_app(AppState::new(MemoryProductStore::default()), &test_config())
}

async fn read(resp: axum::response::Response) -> HelperResult<(StatusCode, Value)> {
    let status = resp.status();
    let bytes = resp.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

/// Send one request, JSON-encoding `body` when given, and decode the JSON response.
pub(crate) async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> HelperResult<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };
    read(app.oneshot(req).await?).await
}

/// Send a raw JSON-typed body without encoding it.
pub(crate) async fn send_raw(app: Router, method: &str, uri: &str, raw: &'static str) -> HelperResult<(StatusCode, Value)> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw))?;
    read(app.oneshot(req).await?).await
}

/// Keeps rows in id order; ids are never reused.
#[derive(Default)]
pub(crate) struct MemoryProductStore {
    rows: Mutex<BTreeMap<i32, Product>>,
    last_id: Mutex<i32>,
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self, limit: i64) -> Result<Vec<ProductSummary>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .map(ProductSummary::from)
            .collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Product>, AppError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        let mut last_id = self.last_id.lock().unwrap();
        *last_id += 1;
        let now = Utc::now();
        let row = Product {
            id: *last_id,
            name: product.name,
            price: product.price,
            availability: product.availability,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, input: ProductInput) -> Result<Option<Product>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|row| {
            row.name = input.name;
            row.price = input.price;
            if let Some(availability) = input.availability {
                row.availability = availability;
            }
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn toggle_availability(&self, id: i32) -> Result<Option<Product>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|row| {
            row.availability = !row.availability;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
