use rust_decimal::Decimal;
use shared::models::{Wallet, WalletTransaction};
use sqlx::PgPool;

/// Outcome of a payment notification
#[derive(Debug)]
pub enum PaymentOutcome {
    /// Order marked paid, wallet credited, ledger row written
    Credited { amount: Decimal },
    /// Order was already paid; success no-op (idempotent replay)
    AlreadyPaid,
    /// Paid amount differs from the order price beyond tolerance
    AmountMismatch { expected: Decimal },
    OrderNotFound,
}

/// Outcome of a withdraw request
#[derive(Debug)]
pub enum WithdrawOutcome {
    /// Amount moved balance → frozen_balance, pending ledger row written
    Accepted(Wallet),
    Insufficient { balance: Decimal },
}

/// Payment amounts may differ from the order price by up to one cent.
fn amount_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Load the user's wallet, creating an empty one on first access.
pub async fn get_or_create(pool: &PgPool, user_id: i64, now: i64) -> Result<Wallet, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO wallets (user_id, created_at, updated_at)
         VALUES ($1, $2, $2)
         ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
         RETURNING *",
    )
    .bind(user_id)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Apply a payment notification for `order_no`.
///
/// One transaction: lock the order row FOR UPDATE; if already paid,
/// succeed without side effects; verify the amount; mark the order
/// paid; lock/create the poster's wallet, credit balance and
/// total_income, and append the income ledger row.
pub async fn credit_for_payment(
    pool: &PgPool,
    order_no: &str,
    paid: Decimal,
    now: i64,
) -> Result<PaymentOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SET LOCAL lock_timeout = '5s'")
        .execute(&mut *tx)
        .await?;

    let order: Option<(i64, i64, String, Decimal, String)> = sqlx::query_as(
        "SELECT id, user_id, title, price, payment_status
         FROM orders WHERE order_no = $1 FOR UPDATE",
    )
    .bind(order_no)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((order_id, user_id, title, price, payment_status)) = order else {
        return Ok(PaymentOutcome::OrderNotFound);
    };

    if payment_status == "paid" {
        return Ok(PaymentOutcome::AlreadyPaid);
    }

    if (paid - price).abs() > amount_tolerance() {
        return Ok(PaymentOutcome::AmountMismatch { expected: price });
    }

    sqlx::query("UPDATE orders SET payment_status = 'paid' WHERE id = $1")
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

    let wallet: Wallet = sqlx::query_as(
        "INSERT INTO wallets (user_id, created_at, updated_at)
         VALUES ($1, $2, $2)
         ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
         RETURNING *",
    )
    .bind(user_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE wallets
         SET balance = balance + $1, total_income = total_income + $1, updated_at = $2
         WHERE id = $3",
    )
    .bind(paid)
    .bind(now)
    .bind(wallet.id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO wallet_transactions (wallet_id, kind, status, amount, order_id, description, created_at)
         VALUES ($1, 'income', 'completed', $2, $3, $4, $5)",
    )
    .bind(wallet.id)
    .bind(paid)
    .bind(order_id)
    .bind(format!("订单支付: {title}"))
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(PaymentOutcome::Credited { amount: paid })
}

/// Request a withdrawal: move the amount balance → frozen_balance and
/// append a pending `withdraw` ledger row, all in one transaction so
/// the ledger and the balance always agree.
pub async fn withdraw(
    pool: &PgPool,
    user_id: i64,
    amount: Decimal,
    now: i64,
) -> Result<WithdrawOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SET LOCAL lock_timeout = '5s'")
        .execute(&mut *tx)
        .await?;

    let wallet: Wallet = sqlx::query_as(
        "INSERT INTO wallets (user_id, created_at, updated_at)
         VALUES ($1, $2, $2)
         ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
         RETURNING *",
    )
    .bind(user_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    // The upsert takes the row lock, re-read is not needed
    if wallet.balance < amount {
        return Ok(WithdrawOutcome::Insufficient {
            balance: wallet.balance,
        });
    }

    let wallet: Wallet = sqlx::query_as(
        "UPDATE wallets
         SET balance = balance - $1, frozen_balance = frozen_balance + $1, updated_at = $2
         WHERE id = $3
         RETURNING *",
    )
    .bind(amount)
    .bind(now)
    .bind(wallet.id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO wallet_transactions (wallet_id, kind, status, amount, description, created_at)
         VALUES ($1, 'withdraw', 'pending', $2, '余额提现', $3)",
    )
    .bind(wallet.id)
    .bind(amount)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(WithdrawOutcome::Accepted(wallet))
}

/// Ledger history, newest first.
pub async fn list_transactions(
    pool: &PgPool,
    wallet_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<WalletTransaction>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM wallet_transactions
         WHERE wallet_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(wallet_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
