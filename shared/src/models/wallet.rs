//! Wallet & Transaction Models (钱包 / 流水)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wallet row, one per user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Wallet {
    pub id: i64,
    pub user_id: i64,
    /// Spendable balance, NUMERIC(10,2)
    pub balance: Decimal,
    /// Amount held by in-flight withdrawals
    pub frozen_balance: Decimal,
    /// Lifetime credits
    pub total_income: Decimal,
    /// Lifetime debits
    pub total_expenditure: Decimal,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Ledger entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Credit from a confirmed order payment
    Income,
    /// Debit for a purchase
    Expenditure,
    /// Reversal of a prior payment
    Refund,
    /// Withdrawal request (balance moved to frozen)
    Withdraw,
}

impl TransactionKind {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "expenditure" => Some(Self::Expenditure),
            "refund" => Some(Self::Refund),
            "withdraw" => Some(Self::Withdraw),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expenditure => "expenditure",
            Self::Refund => "refund",
            Self::Withdraw => "withdraw",
        }
    }
}

/// Ledger entry status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Wallet ledger entry
///
/// Every balance change appends a row here inside the same transaction,
/// the ledger is the audit trail for the wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WalletTransaction {
    pub id: i64,
    pub wallet_id: i64,
    pub kind: String,
    pub status: String,
    /// Always positive, direction is `kind`
    pub amount: Decimal,
    /// Related order ID for income entries
    pub order_id: Option<i64>,
    pub description: Option<String>,
    pub created_at: i64,
}

/// Withdraw request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub amount: Decimal,
}

/// Wallet view returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletView {
    pub balance: Decimal,
    pub frozen_balance: Decimal,
    pub total_income: Decimal,
    pub total_expenditure: Decimal,
    pub updated_at: i64,
}

impl From<Wallet> for WalletView {
    fn from(w: Wallet) -> Self {
        Self {
            balance: w.balance,
            frozen_balance: w.frozen_balance,
            total_income: w.total_income,
            total_expenditure: w.total_expenditure,
            updated_at: w.updated_at,
        }
    }
}
