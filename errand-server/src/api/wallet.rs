//! Wallet endpoints: balance, withdraw, ledger history

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{WalletTransaction, WalletView, WithdrawRequest};

use super::ApiResult;
use crate::auth::UserIdentity;
use crate::db;
use crate::db::wallets::WithdrawOutcome;
use crate::state::AppState;

/// GET /api/wallet — balance snapshot (creates the wallet row on first access)
pub async fn wallet_info(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<WalletView> {
    let now = shared::util::now_millis();
    let wallet = db::wallets::get_or_create(&state.pool, identity.user_id, now).await?;
    Ok(Json(wallet.into()))
}

/// POST /api/wallet/withdraw — move balance to frozen_balance, pending ledger row
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<WithdrawRequest>,
) -> ApiResult<WalletView> {
    if req.amount <= Decimal::ZERO {
        return Err(AppError::validation("amount must be positive").into());
    }

    let now = shared::util::now_millis();
    match db::wallets::withdraw(&state.pool, identity.user_id, req.amount, now).await? {
        WithdrawOutcome::Accepted(wallet) => {
            tracing::info!(
                user_id = identity.user_id,
                amount = %req.amount,
                "Withdrawal requested"
            );
            Ok(Json(wallet.into()))
        }
        WithdrawOutcome::Insufficient { balance } => Err(AppError::new(
            ErrorCode::InsufficientBalance,
        )
        .with_detail("balance", balance.to_string())
        .into()),
    }
}

#[derive(Deserialize)]
pub struct TransactionsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// GET /api/wallet/transactions — ledger history, newest first
pub async fn transactions(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<TransactionsQuery>,
) -> ApiResult<Vec<WalletTransaction>> {
    let now = shared::util::now_millis();
    let wallet = db::wallets::get_or_create(&state.pool, identity.user_id, now).await?;

    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let rows = db::wallets::list_transactions(&state.pool, wallet.id, per_page, offset).await?;
    Ok(Json(rows))
}
