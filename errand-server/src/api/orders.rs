//! Order endpoints: create, list, complete

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderCreate, OrderStatus};

use super::ApiResult;
use crate::auth::UserIdentity;
use crate::db;
use crate::db::orders::CompleteOutcome;
use crate::state::AppState;

/// POST /api/orders — post a new errand order
pub async fn create_order(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<OrderCreate>,
) -> ApiResult<Order> {
    if req.title.trim().is_empty() {
        return Err(AppError::validation("title must not be empty").into());
    }
    if req.price <= Decimal::ZERO {
        return Err(AppError::validation("price must be positive").into());
    }

    let category = db::categories::find_by_id(&state.pool, req.category_id).await?;
    if !category.is_some_and(|c| c.is_active) {
        return Err(AppError::validation("unknown or inactive category").into());
    }

    let now = shared::util::now_millis();
    let order_no = shared::util::order_no();
    let order = db::orders::create(&state.pool, identity.user_id, &order_no, &req, now).await?;

    tracing::info!(
        user_id = identity.user_id,
        order_id = order.id,
        order_no = %order.order_no,
        "Order created"
    );

    Ok(Json(order))
}

#[derive(Deserialize)]
pub struct OrdersQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
}

/// GET /api/orders — caller's orders (posted or riding), newest first
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<OrdersQuery>,
) -> ApiResult<Vec<Order>> {
    if let Some(ref status) = query.status {
        if OrderStatus::from_db(status).is_none() {
            return Err(AppError::validation("unknown status filter").into());
        }
    }

    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let orders = db::orders::list_for_user(
        &state.pool,
        identity.user_id,
        query.status.as_deref(),
        per_page,
        offset,
    )
    .await?;

    Ok(Json(orders))
}

/// POST /api/orders/{id}/complete — rider marks a claimed order delivered
pub async fn complete_order(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(order_id): Path<i64>,
) -> ApiResult<Order> {
    let now = shared::util::now_millis();

    match db::orders::complete(&state.pool, order_id, identity.user_id, now).await? {
        CompleteOutcome::Completed(order) => {
            tracing::info!(
                rider_id = identity.user_id,
                order_id = order.id,
                "Order completed"
            );
            Ok(Json(order))
        }
        CompleteOutcome::NotFound => Err(AppError::new(ErrorCode::OrderNotFound).into()),
        CompleteOutcome::NotRider => {
            Err(AppError::permission_denied("not the assigned rider").into())
        }
        CompleteOutcome::NotCompletable => Err(AppError::new(ErrorCode::OrderNotClaimable).into()),
    }
}
