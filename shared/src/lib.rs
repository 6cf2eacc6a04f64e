//! Shared types for the campus errand platform
//!
//! - [`error`]: unified error codes, [`error::AppError`] and the API envelope
//! - [`models`]: database-facing entities and request/response payloads
//! - [`util`]: time and order-number helpers

pub mod error;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
