//! Rider Settings & Grab Stats Models (骑手设置 / 抢单统计)

use serde::{Deserialize, Serialize};

/// Hard ceiling on incomplete orders inside the rolling window
pub const MAX_INCOMPLETE_ORDERS: i64 = 20;

/// Hard ceiling for the per-hour claim cap; user-configured caps are
/// clamped to this value
pub const MAX_ORDERS_PER_HOUR_CEILING: i32 = 20;

/// Rolling rate-limit window in milliseconds (one hour)
pub const GRAB_WINDOW_MS: i64 = 3_600_000;

/// Rider settings row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RiderSettings {
    pub id: i64,
    pub user_id: i64,
    pub auto_grab_enabled: bool,
    /// Per-hour claim cap, clamped to [`MAX_ORDERS_PER_HOUR_CEILING`]
    pub max_orders_per_hour: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Rider settings view returned to the client, with configured
/// category IDs and an optional advisory warning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiderSettingsView {
    pub auto_grab_enabled: bool,
    pub max_orders_per_hour: i32,
    pub category_ids: Vec<i64>,
    /// Advisory only, e.g. when many categories are selected at once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Update rider settings payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiderSettingsUpdate {
    pub auto_grab_enabled: Option<bool>,
    pub max_orders_per_hour: Option<i32>,
    /// Full replacement of the configured category set
    pub category_ids: Option<Vec<i64>>,
}

/// Rider grab statistics over the rolling window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrabStats {
    /// Claims inside the window
    pub grabbed_this_hour: i64,
    /// Claimed-but-not-completed orders inside the window
    pub incomplete_count: i64,
    /// Per-hour cap currently in effect
    pub max_orders_per_hour: i32,
    /// Whether an auto-grab attempt right now would pass the rate limits
    pub can_grab: bool,
}
