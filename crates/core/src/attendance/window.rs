//! Business-day computation and marking-window checks.
//!
//! The organization operates in a single fixed time zone. Both the day
//! key used for uniqueness and the allowed window are computed in that
//! zone, never in UTC and never in the caller's locale: a UTC day key
//! would split one org-local day across two keys near midnight and let
//! the same employee mark twice.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::attendance::error::AttendanceError;

/// The fixed organizational time zone.
pub const ORG_TZ: Tz = chrono_tz::Asia::Kolkata;

/// First org-local hour at which attendance may be marked (inclusive).
pub const WINDOW_OPEN_HOUR: u32 = 9;

/// Org-local hour at which the window closes (exclusive).
pub const WINDOW_CLOSE_HOUR: u32 = 17;

/// Returns the business day for an instant: the calendar date in the
/// org time zone.
#[must_use]
pub fn business_day(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&ORG_TZ).date_naive()
}

/// Checks whether the marking window is open at an instant.
///
/// The window is `[09:00, 17:00)` org-local: 08:59 and 17:00 are
/// rejected, 09:00 and 16:59 are accepted.
///
/// # Errors
///
/// Returns `AttendanceError::OutsideWindow` with the org-local hour when
/// the window is closed.
pub fn check_window(now: DateTime<Utc>) -> Result<(), AttendanceError> {
    let hour = now.with_timezone(&ORG_TZ).hour();
    if (WINDOW_OPEN_HOUR..WINDOW_CLOSE_HOUR).contains(&hour) {
        Ok(())
    } else {
        Err(AttendanceError::OutsideWindow { hour })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Build a UTC instant from an org-local wall-clock time.
    fn org_local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        ORG_TZ
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .expect("unambiguous org-local time")
            .with_timezone(&Utc)
    }

    #[test]
    fn test_window_opens_at_nine() {
        assert!(check_window(org_local(2024, 6, 10, 9, 0)).is_ok());
    }

    #[test]
    fn test_window_closed_just_before_nine() {
        let err = check_window(org_local(2024, 6, 10, 8, 59)).unwrap_err();
        assert!(matches!(err, AttendanceError::OutsideWindow { hour: 8 }));
    }

    #[test]
    fn test_window_open_until_1659() {
        assert!(check_window(org_local(2024, 6, 10, 16, 59)).is_ok());
    }

    #[test]
    fn test_window_closed_at_seventeen() {
        let err = check_window(org_local(2024, 6, 10, 17, 0)).unwrap_err();
        assert!(matches!(err, AttendanceError::OutsideWindow { hour: 17 }));
    }

    #[test]
    fn test_window_closed_at_midnight() {
        assert!(check_window(org_local(2024, 6, 10, 0, 30)).is_err());
    }

    #[test]
    fn test_business_day_is_org_local_date() {
        // 20:00 UTC on June 10 is already June 11 in the org zone
        // (UTC+05:30), so the day key must be June 11.
        let instant = Utc.with_ymd_and_hms(2024, 6, 10, 20, 0, 0).unwrap();
        assert_eq!(
            business_day(instant),
            NaiveDate::from_ymd_opt(2024, 6, 11).unwrap()
        );
    }

    #[test]
    fn test_business_day_matches_utc_date_midday() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 10, 6, 0, 0).unwrap();
        assert_eq!(
            business_day(instant),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    // For any instant, the window verdict agrees with the org-local
    // hour, and the business day equals the org-local calendar date.
    proptest! {
        #[test]
        fn prop_window_agrees_with_org_hour(secs in 1_500_000_000i64..2_000_000_000) {
            let instant = Utc.timestamp_opt(secs, 0).single().expect("valid timestamp");
            let local = instant.with_timezone(&ORG_TZ);
            let in_window = (WINDOW_OPEN_HOUR..WINDOW_CLOSE_HOUR).contains(&local.hour());

            prop_assert_eq!(check_window(instant).is_ok(), in_window);
        }

        #[test]
        fn prop_business_day_is_org_date(secs in 1_500_000_000i64..2_000_000_000) {
            let instant = Utc.timestamp_opt(secs, 0).single().expect("valid timestamp");
            let local = instant.with_timezone(&ORG_TZ);

            prop_assert_eq!(business_day(instant), local.date_naive());
        }
    }
}
