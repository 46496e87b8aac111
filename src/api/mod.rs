//! HTTP transport: axum routes over the email processor.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::classify_routes;
