use shared::models::{Order, OrderCreate, OrderStatus};
use sqlx::PgPool;

use super::grab_records;

/// Shortlist size for the claim transaction: the oldest pending
/// orders in the chosen category.
pub const CLAIM_SHORTLIST_SIZE: i64 = 5;

/// Outcome of a claim attempt
#[derive(Debug)]
pub enum ClaimOutcome {
    /// Order assigned to the rider, grab record written
    Claimed(Order),
    /// The picked candidate left 'pending' before we locked it
    AlreadyClaimed,
    /// No pending orders in the category
    NoCandidates,
}

/// Outcome of completing an order
#[derive(Debug)]
pub enum CompleteOutcome {
    Completed(Order),
    NotFound,
    /// Caller is not the assigned rider
    NotRider,
    /// Order is not in a completable state
    NotCompletable,
}

pub async fn create(
    pool: &PgPool,
    user_id: i64,
    order_no: &str,
    req: &OrderCreate,
    now: i64,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO orders
             (order_no, category_id, user_id, title, description,
              pickup_address, delivery_address, price, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(order_no)
    .bind(req.category_id)
    .bind(user_id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.pickup_address)
    .bind(&req.delivery_address)
    .bind(req.price)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List orders the user posted or is riding, newest first.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: i64,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Order>, sqlx::Error> {
    match status {
        Some(status) => {
            sqlx::query_as(
                "SELECT * FROM orders
                 WHERE (user_id = $1 OR rider_id = $1) AND status = $2
                 ORDER BY created_at DESC
                 LIMIT $3 OFFSET $4",
            )
            .bind(user_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as(
                "SELECT * FROM orders
                 WHERE user_id = $1 OR rider_id = $1
                 ORDER BY created_at DESC
                 LIMIT $2 OFFSET $3",
            )
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
}

/// Claim one pending order in the category for the rider.
///
/// One transaction: lock the shortlist of oldest pending orders
/// (`FOR UPDATE`, bounded by `lock_timeout`), let the caller pick one,
/// re-check it is still pending, then assign it and write the grab
/// record. At most one rider ever transitions a given order out of
/// pending.
///
/// `pick` receives the shortlist length and returns the chosen index,
/// injected so selection is unit-testable.
pub async fn claim_order(
    pool: &PgPool,
    rider_id: i64,
    category_id: i64,
    pick: impl FnOnce(usize) -> usize,
    now: i64,
) -> Result<ClaimOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // Fail fast instead of queueing behind slow claim transactions
    sqlx::query("SET LOCAL lock_timeout = '5s'")
        .execute(&mut *tx)
        .await?;

    let shortlist: Vec<Order> = sqlx::query_as(
        "SELECT * FROM orders
         WHERE status = 'pending' AND category_id = $1
         ORDER BY created_at
         LIMIT $2
         FOR UPDATE",
    )
    .bind(category_id)
    .bind(CLAIM_SHORTLIST_SIZE)
    .fetch_all(&mut *tx)
    .await?;

    if shortlist.is_empty() {
        return Ok(ClaimOutcome::NoCandidates);
    }

    let candidate = &shortlist[pick(shortlist.len()) % shortlist.len()];

    // Rows are locked and the predicate re-evaluated by Postgres, but keep
    // the explicit status re-check as the claim invariant's last line
    if OrderStatus::from_db(&candidate.status) != Some(OrderStatus::Pending) {
        return Ok(ClaimOutcome::AlreadyClaimed);
    }

    let claimed: Order = sqlx::query_as(
        "UPDATE orders
         SET rider_id = $1, status = 'accepted', accepted_at = $2
         WHERE id = $3
         RETURNING *",
    )
    .bind(rider_id)
    .bind(now)
    .bind(candidate.id)
    .fetch_one(&mut *tx)
    .await?;

    grab_records::insert(&mut tx, rider_id, claimed.id, now).await?;

    tx.commit().await?;

    Ok(ClaimOutcome::Claimed(claimed))
}

/// Rider marks an order delivered: flip the order status and the grab
/// record's `completed` flag in one transaction.
pub async fn complete(
    pool: &PgPool,
    order_id: i64,
    rider_id: i64,
    now: i64,
) -> Result<CompleteOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SET LOCAL lock_timeout = '5s'")
        .execute(&mut *tx)
        .await?;

    let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(order) = order else {
        return Ok(CompleteOutcome::NotFound);
    };

    if order.rider_id != Some(rider_id) {
        return Ok(CompleteOutcome::NotRider);
    }

    if !OrderStatus::from_db(&order.status).is_some_and(|s| s.can_complete()) {
        return Ok(CompleteOutcome::NotCompletable);
    }

    let completed: Order = sqlx::query_as(
        "UPDATE orders SET status = 'completed', completed_at = $1 WHERE id = $2 RETURNING *",
    )
    .bind(now)
    .bind(order_id)
    .fetch_one(&mut *tx)
    .await?;

    grab_records::mark_completed(&mut tx, rider_id, order_id, now).await?;

    tx.commit().await?;

    Ok(CompleteOutcome::Completed(completed))
}
