//! Request validation applied before any store access.

pub mod validation;
pub use validation::RequestValidator;
