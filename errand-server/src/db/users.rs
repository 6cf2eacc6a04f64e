use shared::models::User;
use sqlx::PgPool;

pub async fn create(
    pool: &PgPool,
    username: &str,
    hashed_password: &str,
    now: i64,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO users (username, hashed_password, created_at)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(username)
    .bind(hashed_password)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}
