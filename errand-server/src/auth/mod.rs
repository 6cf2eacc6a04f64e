//! Authentication (JWT)

pub mod user_auth;

pub use user_auth::{UserIdentity, auth_middleware, create_token};
