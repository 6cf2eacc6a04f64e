use sqlx::{PgPool, Postgres, Transaction};

/// Counts over the trailing rate-limit window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCounts {
    /// Successful claims inside the window
    pub total: i64,
    /// Claims inside the window not yet completed
    pub incomplete: i64,
}

/// Claims in `[window_start, now]` for the rider.
pub async fn counts_since(
    pool: &PgPool,
    user_id: i64,
    window_start: i64,
) -> Result<WindowCounts, sqlx::Error> {
    let (total, incomplete): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE NOT completed)
         FROM rider_grab_records
         WHERE user_id = $1 AND grabbed_at >= $2",
    )
    .bind(user_id)
    .bind(window_start)
    .fetch_one(pool)
    .await?;

    Ok(WindowCounts { total, incomplete })
}

/// Insert a grab record inside the claim transaction.
pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    order_id: i64,
    grabbed_at: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO rider_grab_records (user_id, order_id, grabbed_at) VALUES ($1, $2, $3)",
    )
    .bind(user_id)
    .bind(order_id)
    .bind(grabbed_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Flip the `completed` flag inside the order-completion transaction.
pub async fn mark_completed(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    order_id: i64,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE rider_grab_records
         SET completed = TRUE, completed_at = $1
         WHERE user_id = $2 AND order_id = $3",
    )
    .bind(now)
    .bind(user_id)
    .bind(order_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
