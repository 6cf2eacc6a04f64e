//! Order category listing

use axum::Json;
use axum::extract::State;
use shared::models::OrderCategory;

use super::ApiResult;
use crate::db;
use crate::state::AppState;

/// GET /api/categories — active categories, in display order
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<OrderCategory>> {
    let categories = db::categories::list_active(&state.pool).await?;
    Ok(Json(categories))
}
