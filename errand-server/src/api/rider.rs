//! Rider endpoints: settings, auto-grab, stats

use axum::{Extension, Json, extract::State};
use shared::error::AppError;
use shared::models::{
    GrabStats, GrabbedOrder, RiderSettingsUpdate, RiderSettingsView,
};

use super::ApiResult;
use crate::auth::UserIdentity;
use crate::db;
use crate::grab;
use crate::grab::eligibility;
use crate::state::AppState;

/// GET /api/rider/settings
pub async fn get_settings(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<RiderSettingsView> {
    let now = shared::util::now_millis();
    let settings = db::rider_settings::get_or_create(&state.pool, identity.user_id, now).await?;
    let category_ids = db::rider_settings::category_ids(&state.pool, settings.id).await?;

    Ok(Json(RiderSettingsView {
        auto_grab_enabled: settings.auto_grab_enabled,
        max_orders_per_hour: settings.max_orders_per_hour,
        category_ids,
        warning: None,
    }))
}

/// POST /api/rider/settings — update; the category list replaces the whole set
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<RiderSettingsUpdate>,
) -> ApiResult<RiderSettingsView> {
    if let Some(cap) = req.max_orders_per_hour {
        if cap < 1 {
            return Err(AppError::validation("max_orders_per_hour must be at least 1").into());
        }
    }

    // Selecting several categories is allowed but flagged, it tends to
    // spread the rider thin
    let mut warning = None;
    if let Some(ref ids) = req.category_ids {
        let known = db::categories::active_ids_among(&state.pool, ids).await?;
        if known.len() != ids.len() {
            return Err(AppError::validation("unknown or inactive category in list").into());
        }
        if ids.len() > 1 {
            warning = Some(format!(
                "您选择了 {} 个订单分类，这可能会影响接单效率",
                ids.len()
            ));
        }
    }

    let now = shared::util::now_millis();
    let (settings, category_ids) =
        db::rider_settings::update(&state.pool, identity.user_id, &req, now).await?;

    tracing::info!(
        user_id = identity.user_id,
        auto_grab_enabled = settings.auto_grab_enabled,
        max_orders_per_hour = settings.max_orders_per_hour,
        categories = category_ids.len(),
        "Rider settings updated"
    );

    Ok(Json(RiderSettingsView {
        auto_grab_enabled: settings.auto_grab_enabled,
        max_orders_per_hour: settings.max_orders_per_hour,
        category_ids,
        warning,
    }))
}

/// POST /api/rider/auto-grab — the claim path
pub async fn auto_grab(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<GrabbedOrder> {
    let grabbed = grab::auto_grab(&state.pool, identity.user_id).await?;
    Ok(Json(grabbed))
}

/// GET /api/rider/stats — trailing-hour counters
pub async fn grab_stats(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<GrabStats> {
    let now = shared::util::now_millis();
    let settings = db::rider_settings::get_or_create(&state.pool, identity.user_id, now).await?;
    let category_count = db::rider_settings::category_ids(&state.pool, settings.id)
        .await?
        .len();
    let counts = db::grab_records::counts_since(
        &state.pool,
        identity.user_id,
        eligibility::window_start(now),
    )
    .await?;

    let can_grab = eligibility::check(&settings, category_count, counts).is_ok();

    Ok(Json(GrabStats {
        grabbed_this_hour: counts.total,
        incomplete_count: counts.incomplete,
        max_orders_per_hour: eligibility::effective_cap(settings.max_orders_per_hour),
        can_grab,
    }))
}
