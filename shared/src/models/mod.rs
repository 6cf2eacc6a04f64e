//! Data models
//!
//! Shared between errand-server and clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (Postgres BIGSERIAL), timestamps are epoch millis,
//! money amounts are `Decimal` (NUMERIC(10,2)).

pub mod category;
pub mod order;
pub mod rider;
pub mod user;
pub mod wallet;

// Re-exports
pub use category::*;
pub use order::*;
pub use rider::*;
pub use user::*;
pub use wallet::*;
