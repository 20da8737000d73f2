//! OpenAPI document and the Swagger UI mounted at `/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::{FieldError, Location, ValidationErrorBody};
use crate::handlers::product;
use crate::model::{Product, ProductInput, ProductSummary};
use crate::response::{MessageBody, ProductBody, ProductListBody, ProductUpdatedBody};

pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_PATH: &str = "/docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Products REST API", description = "API Docs for Products"),
    paths(
        product::list,
        product::read,
        product::create,
        product::update,
        product::update_availability,
        product::delete,
    ),
    components(schemas(
        Product,
        ProductSummary,
        ProductInput,
        ProductBody,
        ProductListBody,
        ProductUpdatedBody,
        MessageBody,
        ValidationErrorBody,
        FieldError,
        Location,
    )),
    tags((name = "products", description = "API operation related to products"))
)]
pub struct ApiDoc;

pub fn docs_routes() -> Router {
    SwaggerUi::new(DOCS_PATH)
        .url(OPENAPI_PATH, ApiDoc::openapi())
        .into()
}
