//! Route tables.

mod common;
mod product;
pub use common::common_routes;
pub use product::product_routes;
