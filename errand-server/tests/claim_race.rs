//! 并发抢单集成测试
//!
//! Database-backed properties of the claim transaction and the payment
//! webhook. Requires a PostgreSQL instance:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/errand_test cargo test -- --ignored
//! ```

use errand_server::db;
use errand_server::db::wallets::PaymentOutcome;
use errand_server::grab;
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{GRAB_WINDOW_MS, OrderCreate, RiderSettingsUpdate};
use sqlx::PgPool;

const CONCURRENCY: usize = 8;

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for DB tests");
    let pool = PgPool::connect(&url).await.expect("connect");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrate");
    pool
}

/// Unique suffix so repeated runs against the same database don't collide.
fn run_tag() -> String {
    format!("{}", shared::util::now_millis())
}

async fn create_user(pool: &PgPool, name: &str) -> i64 {
    let now = shared::util::now_millis();
    let user = db::users::create(pool, name, "$argon2id$stub", now)
        .await
        .expect("create user");
    user.id
}

async fn express_category_id(pool: &PgPool) -> i64 {
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM order_categories WHERE code = 'express'")
        .fetch_one(pool)
        .await
        .expect("seeded category");
    id
}

async fn create_pending_order(pool: &PgPool, poster: i64, category_id: i64) -> i64 {
    let now = shared::util::now_millis();
    let order = db::orders::create(
        pool,
        poster,
        &shared::util::order_no(),
        &OrderCreate {
            category_id,
            title: "快递代取".into(),
            description: None,
            pickup_address: "菜鸟驿站".into(),
            delivery_address: "3号宿舍楼".into(),
            price: Decimal::new(500, 2),
        },
        now,
    )
    .await
    .expect("create order");
    order.id
}

async fn setup_rider(pool: &PgPool, name: &str, category_id: i64) -> i64 {
    let rider = create_user(pool, name).await;
    let now = shared::util::now_millis();
    db::rider_settings::update(
        pool,
        rider,
        &RiderSettingsUpdate {
            auto_grab_enabled: Some(true),
            max_orders_per_hour: Some(10),
            category_ids: Some(vec![category_id]),
        },
        now,
    )
    .await
    .expect("rider settings");
    rider
}

/// A category only this run posts into, so leftover pending orders from
/// earlier runs never enter the shortlist.
async fn create_category(pool: &PgPool, tag: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO order_categories (code, name, sort_order) VALUES ($1, '快递代取', 99)
         RETURNING id",
    )
    .bind(format!("express_{tag}"))
    .fetch_one(pool)
    .await
    .expect("create category");
    id
}

/// One auto-grab against several pending candidates: exactly one order
/// is assigned and the rest stay pending.
#[tokio::test]
#[ignore]
async fn single_grab_claims_exactly_one_candidate() {
    let pool = test_pool().await;
    let tag = run_tag();
    let category_id = create_category(&pool, &tag).await;

    let poster = create_user(&pool, &format!("multi_{tag}")).await;
    let mut order_ids = Vec::new();
    for _ in 0..3 {
        order_ids.push(create_pending_order(&pool, poster, category_id).await);
    }

    let rider = setup_rider(&pool, &format!("multirider_{tag}"), category_id).await;

    let grabbed = grab::auto_grab(&pool, rider).await.expect("grab");
    assert!(order_ids.contains(&grabbed.order_id));
    assert_eq!(grabbed.category, format!("express_{tag}"));
    assert_eq!(grabbed.price, Decimal::new(500, 2));

    for order_id in &order_ids {
        let order = db::orders::find_by_id(&pool, *order_id)
            .await
            .expect("query")
            .expect("order");
        if *order_id == grabbed.order_id {
            assert_eq!(order.status, "accepted");
            assert_eq!(order.rider_id, Some(rider));
            assert!(order.accepted_at.is_some());
        } else {
            assert_eq!(order.status, "pending");
            assert_eq!(order.rider_id, None);
        }
    }

    let counts = db::grab_records::counts_since(&pool, rider, 0)
        .await
        .expect("counts");
    assert_eq!(counts.total, 1, "exactly one grab record");
    assert_eq!(counts.incomplete, 1);
}

/// N concurrent auto-grabs against a single pending order: exactly one
/// rider wins, the rest see no_candidates/already_claimed.
#[tokio::test]
#[ignore]
async fn concurrent_claims_award_order_once() {
    let pool = test_pool().await;
    let tag = run_tag();
    let category_id = express_category_id(&pool).await;

    let poster = create_user(&pool, &format!("poster_{tag}")).await;
    let order_id = create_pending_order(&pool, poster, category_id).await;

    let mut riders = Vec::new();
    for i in 0..CONCURRENCY {
        riders.push(setup_rider(&pool, &format!("rider_{tag}_{i}"), category_id).await);
    }

    let mut handles = Vec::new();
    for rider in riders {
        let pool = pool.clone();
        handles.push(tokio::spawn(
            async move { grab::auto_grab(&pool, rider).await },
        ));
    }

    let mut wins = 0;
    for handle in handles {
        match handle.await.expect("task") {
            Ok(grabbed) => {
                assert_eq!(grabbed.order_id, order_id);
                wins += 1;
            }
            Err(e) => {
                let app: shared::error::AppError = e.into();
                assert!(
                    matches!(
                        app.code,
                        ErrorCode::NoCandidates | ErrorCode::OrderAlreadyClaimed
                    ),
                    "unexpected rejection: {app:?}"
                );
            }
        }
    }
    assert_eq!(wins, 1, "exactly one rider must win the order");

    let order = db::orders::find_by_id(&pool, order_id)
        .await
        .expect("query")
        .expect("order");
    assert_eq!(order.status, "accepted");
    assert!(order.rider_id.is_some());

    let (records,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM rider_grab_records WHERE order_id = $1")
            .bind(order_id)
            .fetch_one(&pool)
            .await
            .expect("count");
    assert_eq!(records, 1, "exactly one grab record");
}

/// The webhook replayed with the same order_no credits the wallet once.
#[tokio::test]
#[ignore]
async fn payment_webhook_is_idempotent() {
    let pool = test_pool().await;
    let tag = run_tag();
    let category_id = express_category_id(&pool).await;

    let poster = create_user(&pool, &format!("payer_{tag}")).await;
    let order_id = create_pending_order(&pool, poster, category_id).await;
    let order = db::orders::find_by_id(&pool, order_id)
        .await
        .expect("query")
        .expect("order");

    let now = shared::util::now_millis();
    let amount = Decimal::new(500, 2);

    let first = db::wallets::credit_for_payment(&pool, &order.order_no, amount, now)
        .await
        .expect("first notify");
    assert!(matches!(first, PaymentOutcome::Credited { .. }));

    let second = db::wallets::credit_for_payment(&pool, &order.order_no, amount, now)
        .await
        .expect("second notify");
    assert!(matches!(second, PaymentOutcome::AlreadyPaid));

    let wallet = db::wallets::get_or_create(&pool, poster, now)
        .await
        .expect("wallet");
    assert_eq!(wallet.balance, amount);
    assert_eq!(wallet.total_income, amount);

    let (rows,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM wallet_transactions WHERE order_id = $1 AND kind = 'income'",
    )
    .bind(order_id)
    .fetch_one(&pool)
    .await
    .expect("count");
    assert_eq!(rows, 1, "exactly one income row");
}

/// Amounts off by more than one cent are rejected and nothing is credited.
#[tokio::test]
#[ignore]
async fn payment_amount_mismatch_rejected() {
    let pool = test_pool().await;
    let tag = run_tag();
    let category_id = express_category_id(&pool).await;

    let poster = create_user(&pool, &format!("mismatch_{tag}")).await;
    let order_id = create_pending_order(&pool, poster, category_id).await;
    let order = db::orders::find_by_id(&pool, order_id)
        .await
        .expect("query")
        .expect("order");

    let now = shared::util::now_millis();
    let outcome = db::wallets::credit_for_payment(&pool, &order.order_no, Decimal::new(700, 2), now)
        .await
        .expect("notify");
    assert!(matches!(outcome, PaymentOutcome::AmountMismatch { .. }));

    let order = db::orders::find_by_id(&pool, order_id)
        .await
        .expect("query")
        .expect("order");
    assert_eq!(order.payment_status, "pending");
}

/// Grabs just outside the trailing hour stop counting against the cap.
#[tokio::test]
#[ignore]
async fn rate_limit_window_boundary() {
    let pool = test_pool().await;
    let tag = run_tag();
    let category_id = express_category_id(&pool).await;

    let rider = setup_rider(&pool, &format!("window_{tag}"), category_id).await;
    let poster = create_user(&pool, &format!("wposter_{tag}")).await;

    let now = shared::util::now_millis();

    // One grab 61 minutes ago, one 59 minutes ago
    for (i, age_ms) in [(0, GRAB_WINDOW_MS + 60_000), (1, GRAB_WINDOW_MS - 60_000)] {
        let order_id = create_pending_order(&pool, poster, category_id).await;
        sqlx::query(
            "INSERT INTO rider_grab_records (user_id, order_id, grabbed_at, completed)
             VALUES ($1, $2, $3, TRUE)",
        )
        .bind(rider)
        .bind(order_id)
        .bind(now - age_ms)
        .execute(&pool)
        .await
        .unwrap_or_else(|e| panic!("insert record {i}: {e}"));
    }

    let counts = db::grab_records::counts_since(
        &pool,
        rider,
        errand_server::grab::eligibility::window_start(now),
    )
    .await
    .expect("counts");

    assert_eq!(counts.total, 1, "only the grab inside the window counts");
}
