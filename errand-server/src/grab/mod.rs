//! Auto-grab: automatic order assignment for riders
//!
//! The claim path runs in three stages:
//! 1. [`eligibility`] — rate-limit decision from settings + window counts
//! 2. [`picker`] — random category, then random candidate from the shortlist
//! 3. `db::orders::claim_order` — the row-locked assignment transaction

pub mod eligibility;
pub mod picker;

use rand::SeedableRng;
use rand::rngs::StdRng;
use shared::error::{AppError, ErrorCode};
use shared::models::GrabbedOrder;
use sqlx::PgPool;

use crate::db;
use crate::error::{ServiceError, ServiceResult};
use eligibility::GrabRejection;

/// Attempt to grab one pending order for the rider.
///
/// Every rejection carries a machine-readable `reason` detail plus the
/// counts the client needs to back off sensibly.
pub async fn auto_grab(pool: &PgPool, rider_id: i64) -> ServiceResult<GrabbedOrder> {
    let now = shared::util::now_millis();

    let settings = db::rider_settings::get_or_create(pool, rider_id, now).await?;
    let categories = db::rider_settings::category_ids(pool, settings.id).await?;
    let counts =
        db::grab_records::counts_since(pool, rider_id, eligibility::window_start(now)).await?;

    eligibility::check(&settings, categories.len(), counts).map_err(rejection_to_error)?;

    // StdRng here, not thread_rng: the picker closure crosses an await
    // inside the claim transaction, so it must be Send
    let mut rng = StdRng::from_entropy();
    let category_id = picker::pick_category(&mut rng, &categories)
        .ok_or_else(|| AppError::new(ErrorCode::NoCategoriesConfigured))?;

    let outcome = db::orders::claim_order(
        pool,
        rider_id,
        category_id,
        move |len| picker::pick_index(&mut rng, len),
        now,
    )
    .await?;

    match outcome {
        db::orders::ClaimOutcome::Claimed(order) => {
            let category = db::categories::find_by_id(pool, order.category_id)
                .await?
                .map(|c| c.code)
                .unwrap_or_default();

            tracing::info!(
                rider_id,
                order_id = order.id,
                order_no = %order.order_no,
                %category,
                "Order auto-grabbed"
            );

            Ok(GrabbedOrder {
                order_id: order.id,
                order_no: order.order_no,
                category,
                price: order.price,
            })
        }
        db::orders::ClaimOutcome::AlreadyClaimed => Err(ServiceError::App(
            AppError::new(ErrorCode::OrderAlreadyClaimed).with_detail("reason", "already_claimed"),
        )),
        db::orders::ClaimOutcome::NoCandidates => Err(ServiceError::App(
            AppError::new(ErrorCode::NoCandidates)
                .with_detail("reason", "no_candidates")
                .with_detail("category_id", category_id),
        )),
    }
}

fn rejection_to_error(rejection: GrabRejection) -> ServiceError {
    let err = match rejection {
        GrabRejection::AutoGrabDisabled => {
            AppError::new(ErrorCode::AutoGrabDisabled).with_detail("reason", "auto_grab_disabled")
        }
        GrabRejection::NoCategories => {
            AppError::new(ErrorCode::NoCategoriesConfigured).with_detail("reason", "no_categories")
        }
        GrabRejection::TooManyIncomplete { incomplete } => {
            AppError::new(ErrorCode::TooManyIncomplete)
                .with_detail("reason", "too_many_incomplete")
                .with_detail("incomplete_count", incomplete)
        }
        GrabRejection::HourlyCapReached { grabbed, cap } => {
            AppError::new(ErrorCode::HourlyCapReached)
                .with_detail("reason", "hourly_cap_reached")
                .with_detail("grabbed_this_hour", grabbed)
                .with_detail("max_orders_per_hour", cap)
        }
    };
    ServiceError::App(err)
}
