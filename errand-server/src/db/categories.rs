use shared::models::OrderCategory;
use sqlx::PgPool;

pub async fn list_active(pool: &PgPool) -> Result<Vec<OrderCategory>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_categories WHERE is_active ORDER BY sort_order")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<OrderCategory>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Filter the given IDs down to ones that exist and are active.
/// Used to validate rider settings updates.
pub async fn active_ids_among(pool: &PgPool, ids: &[i64]) -> Result<Vec<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT id FROM order_categories WHERE is_active AND id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}
