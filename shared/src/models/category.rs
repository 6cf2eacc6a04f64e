//! Order Category Model

use serde::{Deserialize, Serialize};

/// Order category (订单分类: 快递代取 / 外卖代买 / ...)
///
/// Categories are seeded by migration, `code` is the stable identifier
/// used by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderCategory {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
}
