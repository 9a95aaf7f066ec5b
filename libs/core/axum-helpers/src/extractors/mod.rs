//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`crate::AppError`] so failures share the
//! standard error body.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
