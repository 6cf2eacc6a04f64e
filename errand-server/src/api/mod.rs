//! API routes for errand-server

pub mod auth;
pub mod categories;
pub mod health;
pub mod orders;
pub mod payment;
pub mod rider;
pub mod wallet;

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::auth::auth_middleware;
use crate::state::AppState;

/// Handler result: JSON payload or a service error (renders as an
/// `ApiResponse` envelope with the mapped HTTP status)
pub type ApiResult<T> = Result<axum::Json<T>, crate::error::ServiceError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth)
    let public = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/payment/notify", post(payment::payment_notify));

    // JWT-authenticated routes
    let authed = Router::new()
        .route(
            "/api/orders",
            post(orders::create_order).get(orders::list_orders),
        )
        .route("/api/orders/{id}/complete", post(orders::complete_order))
        .route(
            "/api/rider/settings",
            get(rider::get_settings).post(rider::update_settings),
        )
        .route("/api/rider/auto-grab", post(rider::auto_grab))
        .route("/api/rider/stats", get(rider::grab_stats))
        .route("/api/wallet", get(wallet::wallet_info))
        .route("/api/wallet/withdraw", post(wallet::withdraw))
        .route("/api/wallet/transactions", get(wallet::transactions))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(authed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
