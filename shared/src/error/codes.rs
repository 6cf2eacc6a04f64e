//! Unified error codes for the campus errand platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment / wallet errors
//! - 6xxx: Rider / auto-grab errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, mini-program clients).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order was claimed by another rider between selection and locking
    OrderAlreadyClaimed = 4002,
    /// Order is not in a state that allows this operation
    OrderNotClaimable = 4003,
    /// No pending orders match the rider's categories
    NoCandidates = 4004,

    // ==================== 5xxx: Payment / wallet ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Paid amount does not match the order price
    PaymentAmountMismatch = 5002,
    /// Order has already been paid (idempotent replay)
    OrderAlreadyPaid = 5003,
    /// Wallet not found
    WalletNotFound = 5004,
    /// Wallet balance is insufficient
    InsufficientBalance = 5005,

    // ==================== 6xxx: Rider / auto-grab ====================
    /// Rider settings not configured yet
    RiderSettingsNotFound = 6001,
    /// Auto-grab is not enabled for this rider
    AutoGrabDisabled = 6002,
    /// Rider has no order categories configured
    NoCategoriesConfigured = 6003,
    /// Rider reached the hourly claim cap
    HourlyCapReached = 6004,
    /// Rider has too many incomplete orders in the window
    TooManyIncomplete = 6005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Lock wait or statement timeout (transient, client may retry)
    TimeoutError = 9003,
    /// Configuration error
    ConfigError = 9004,
}

impl ErrorCode {
    /// Numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::NotAuthenticated => "Please login first",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",

            Self::PermissionDenied => "Permission denied",

            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyClaimed => "Order was already claimed by another rider",
            Self::OrderNotClaimable => "Order state does not allow this operation",
            Self::NoCandidates => "No pending orders available",

            Self::PaymentFailed => "Payment processing failed",
            Self::PaymentAmountMismatch => "Paid amount does not match order price",
            Self::OrderAlreadyPaid => "Order has already been paid",
            Self::WalletNotFound => "Wallet not found",
            Self::InsufficientBalance => "Insufficient balance",

            Self::RiderSettingsNotFound => "Rider settings not configured",
            Self::AutoGrabDisabled => "Auto-grab is not enabled",
            Self::NoCategoriesConfigured => "No order categories configured",
            Self::HourlyCapReached => "Hourly claim cap reached",
            Self::TooManyIncomplete => "Too many incomplete orders",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::TimeoutError => "Operation timed out, please retry",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when deserializing an unknown u16 error code
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            2001 => Self::PermissionDenied,
            4001 => Self::OrderNotFound,
            4002 => Self::OrderAlreadyClaimed,
            4003 => Self::OrderNotClaimable,
            4004 => Self::NoCandidates,
            5001 => Self::PaymentFailed,
            5002 => Self::PaymentAmountMismatch,
            5003 => Self::OrderAlreadyPaid,
            5004 => Self::WalletNotFound,
            5005 => Self::InsufficientBalance,
            6001 => Self::RiderSettingsNotFound,
            6002 => Self::AutoGrabDisabled,
            6003 => Self::NoCategoriesConfigured,
            6004 => Self::HourlyCapReached,
            6005 => Self::TooManyIncomplete,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::TimeoutError,
            9004 => Self::ConfigError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
