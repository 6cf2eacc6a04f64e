//! Payment webhook
//!
//! POST /api/payment/notify — provider-facing callback. Responses use the
//! provider's `SUCCESS` / `FAIL` codes (consumed by its retry logic, not
//! end users). Replays of an already-processed order_no succeed without
//! side effects.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db;
use crate::db::wallets::PaymentOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PaymentNotify {
    pub order_no: String,
    pub total_amount: Decimal,
}

fn parse_notify(body: &[u8]) -> Result<PaymentNotify, serde_json::Error> {
    serde_json::from_slice(body)
}

pub async fn payment_notify(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    // Take the raw body: decode failures must still answer in the
    // provider's envelope, not the extractor's default error body
    let notify = match parse_notify(&body) {
        Ok(notify) => notify,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed payment notification");
            return fail(StatusCode::BAD_REQUEST, "请求格式错误");
        }
    };

    if notify.order_no.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "订单号缺失");
    }

    let now = shared::util::now_millis();
    let outcome = db::wallets::credit_for_payment(
        &state.pool,
        &notify.order_no,
        notify.total_amount,
        now,
    )
    .await;

    match outcome {
        Ok(PaymentOutcome::Credited { amount }) => {
            tracing::info!(order_no = %notify.order_no, %amount, "Payment processed");
            success()
        }
        Ok(PaymentOutcome::AlreadyPaid) => {
            tracing::info!(order_no = %notify.order_no, "Payment already processed, replay ignored");
            success()
        }
        Ok(PaymentOutcome::AmountMismatch { expected }) => {
            tracing::warn!(
                order_no = %notify.order_no,
                paid = %notify.total_amount,
                %expected,
                "Payment amount mismatch"
            );
            fail(StatusCode::BAD_REQUEST, "金额不匹配")
        }
        Ok(PaymentOutcome::OrderNotFound) => {
            tracing::warn!(order_no = %notify.order_no, "Payment for unknown order");
            fail(StatusCode::NOT_FOUND, "订单不存在")
        }
        Err(e) => {
            tracing::error!(order_no = %notify.order_no, error = %e, "Payment processing failed");
            fail(StatusCode::INTERNAL_SERVER_ERROR, "处理失败")
        }
    }
}

fn success() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "code": "SUCCESS", "message": "OK" })),
    )
}

fn fail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "code": "FAIL", "message": message })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_body_parses() {
        let notify =
            parse_notify(br#"{"order_no":"20260829120000123456","total_amount":5.00}"#).unwrap();
        assert_eq!(notify.order_no, "20260829120000123456");
        assert_eq!(notify.total_amount, Decimal::new(500, 2));
    }

    #[test]
    fn malformed_body_maps_to_fail_envelope() {
        assert!(parse_notify(b"not json").is_err());
        assert!(parse_notify(br#"{"order_no":"x"}"#).is_err());

        let (status, Json(body)) = fail(StatusCode::BAD_REQUEST, "请求格式错误");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "FAIL");
        assert_eq!(body["message"], "请求格式错误");
    }
}
