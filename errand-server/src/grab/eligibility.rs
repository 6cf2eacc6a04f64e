//! Rate-limit decision for auto-grab
//!
//! Pure functions: settings and window counts in, Allow or a
//! structured rejection out. No database access here.

use shared::models::{GRAB_WINDOW_MS, MAX_INCOMPLETE_ORDERS, MAX_ORDERS_PER_HOUR_CEILING, RiderSettings};

use crate::db::grab_records::WindowCounts;

/// Why an auto-grab attempt was rejected before order selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabRejection {
    AutoGrabDisabled,
    NoCategories,
    TooManyIncomplete { incomplete: i64 },
    HourlyCapReached { grabbed: i64, cap: i32 },
}

/// Start of the trailing rate-limit window.
pub fn window_start(now: i64) -> i64 {
    now - GRAB_WINDOW_MS
}

/// Effective per-hour cap: the configured value, never above the hard ceiling.
pub fn effective_cap(configured: i32) -> i32 {
    configured.min(MAX_ORDERS_PER_HOUR_CEILING)
}

/// Check the rider against the rate limits. Checks run in a fixed
/// order so the client always sees the most fundamental problem first.
pub fn check(
    settings: &RiderSettings,
    category_count: usize,
    counts: WindowCounts,
) -> Result<(), GrabRejection> {
    if !settings.auto_grab_enabled {
        return Err(GrabRejection::AutoGrabDisabled);
    }

    if category_count == 0 {
        return Err(GrabRejection::NoCategories);
    }

    if counts.incomplete >= MAX_INCOMPLETE_ORDERS {
        return Err(GrabRejection::TooManyIncomplete {
            incomplete: counts.incomplete,
        });
    }

    let cap = effective_cap(settings.max_orders_per_hour);
    if counts.total >= cap as i64 {
        return Err(GrabRejection::HourlyCapReached {
            grabbed: counts.total,
            cap,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(enabled: bool, cap: i32) -> RiderSettings {
        RiderSettings {
            id: 1,
            user_id: 1,
            auto_grab_enabled: enabled,
            max_orders_per_hour: cap,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn counts(total: i64, incomplete: i64) -> WindowCounts {
        WindowCounts { total, incomplete }
    }

    #[test]
    fn allows_eligible_rider() {
        assert_eq!(check(&settings(true, 10), 2, counts(3, 1)), Ok(()));
    }

    #[test]
    fn disabled_rejected_first() {
        // Disabled wins even when every other limit is also violated
        assert_eq!(
            check(&settings(false, 10), 0, counts(30, 30)),
            Err(GrabRejection::AutoGrabDisabled)
        );
    }

    #[test]
    fn no_categories_rejected() {
        assert_eq!(
            check(&settings(true, 10), 0, counts(0, 0)),
            Err(GrabRejection::NoCategories)
        );
    }

    #[test]
    fn incomplete_ceiling_ignores_configured_cap() {
        // Hard ceiling applies even with a generous hourly cap and few grabs
        assert_eq!(
            check(&settings(true, 20), 1, counts(0, 20)),
            Err(GrabRejection::TooManyIncomplete { incomplete: 20 })
        );
    }

    #[test]
    fn hourly_cap_boundary() {
        assert_eq!(check(&settings(true, 5), 1, counts(4, 0)), Ok(()));
        assert_eq!(
            check(&settings(true, 5), 1, counts(5, 0)),
            Err(GrabRejection::HourlyCapReached { grabbed: 5, cap: 5 })
        );
    }

    #[test]
    fn configured_cap_clamped_to_ceiling() {
        assert_eq!(effective_cap(50), 20);
        assert_eq!(effective_cap(20), 20);
        assert_eq!(effective_cap(3), 3);
        assert_eq!(
            check(&settings(true, 50), 1, counts(20, 0)),
            Err(GrabRejection::HourlyCapReached {
                grabbed: 20,
                cap: 20
            })
        );
    }

    #[test]
    fn incomplete_checked_before_hourly_cap() {
        assert_eq!(
            check(&settings(true, 5), 1, counts(5, 20)),
            Err(GrabRejection::TooManyIncomplete { incomplete: 20 })
        );
    }

    #[test]
    fn window_start_is_one_hour() {
        let now = 10_000_000;
        assert_eq!(window_start(now), now - 3_600_000);
    }
}
