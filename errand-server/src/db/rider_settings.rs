use shared::models::{MAX_ORDERS_PER_HOUR_CEILING, RiderSettings, RiderSettingsUpdate};
use sqlx::PgPool;

/// Load the rider's settings, creating the default row (auto-grab off)
/// on first access.
pub async fn get_or_create(
    pool: &PgPool,
    user_id: i64,
    now: i64,
) -> Result<RiderSettings, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO rider_settings (user_id, created_at, updated_at)
         VALUES ($1, $2, $2)
         ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
         RETURNING *",
    )
    .bind(user_id)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Configured category IDs for the settings row.
pub async fn category_ids(pool: &PgPool, settings_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT category_id FROM rider_setting_categories
         WHERE rider_settings_id = $1
         ORDER BY category_id",
    )
    .bind(settings_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Apply a settings update. The per-hour cap is clamped to the hard
/// ceiling; a provided category list replaces the whole set. Settings
/// row and join rows change in one transaction.
pub async fn update(
    pool: &PgPool,
    user_id: i64,
    patch: &RiderSettingsUpdate,
    now: i64,
) -> Result<(RiderSettings, Vec<i64>), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let settings: RiderSettings = sqlx::query_as(
        "INSERT INTO rider_settings (user_id, created_at, updated_at)
         VALUES ($1, $2, $2)
         ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
         RETURNING *",
    )
    .bind(user_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let enabled = patch.auto_grab_enabled.unwrap_or(settings.auto_grab_enabled);
    let cap = patch
        .max_orders_per_hour
        .unwrap_or(settings.max_orders_per_hour)
        .clamp(1, MAX_ORDERS_PER_HOUR_CEILING);

    let settings: RiderSettings = sqlx::query_as(
        "UPDATE rider_settings
         SET auto_grab_enabled = $1, max_orders_per_hour = $2, updated_at = $3
         WHERE id = $4
         RETURNING *",
    )
    .bind(enabled)
    .bind(cap)
    .bind(now)
    .bind(settings.id)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(ref ids) = patch.category_ids {
        sqlx::query("DELETE FROM rider_setting_categories WHERE rider_settings_id = $1")
            .bind(settings.id)
            .execute(&mut *tx)
            .await?;
        for category_id in ids {
            sqlx::query(
                "INSERT INTO rider_setting_categories (rider_settings_id, category_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(settings.id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    let ids: Vec<(i64,)> = sqlx::query_as(
        "SELECT category_id FROM rider_setting_categories
         WHERE rider_settings_id = $1
         ORDER BY category_id",
    )
    .bind(settings.id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((settings, ids.into_iter().map(|(id,)| id).collect()))
}
