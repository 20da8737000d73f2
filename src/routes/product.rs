//! Product CRUD routes, mounted under `/api/products`.

use crate::handlers::product::{create, delete, list, read, update, update_availability};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route(
            "/:id",
            get(read).put(update).patch(update_availability).delete(delete),
        )
        .with_state(state)
}
