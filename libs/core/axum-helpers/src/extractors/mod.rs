//! Custom extractors for Axum handlers.
//!
//! These reduce boilerplate and give path and body failures the same
//! JSON error shape as every other error in the API.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
