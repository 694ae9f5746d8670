//! Date helpers shared by the coverage-period entities.

use chrono::{DateTime, Utc};

use crate::error::{DomainError, DomainResult};

/// Whole days between two instants, counted on the UTC calendar.
///
/// `2024-01-01T23:00Z` to `2024-01-02T01:00Z` is one day. Negative when
/// `to` falls on an earlier date than `from`.
pub fn calendar_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to.date_naive() - from.date_naive()).num_days()
}

/// Checks the construction-time invariant `end >= start`.
pub fn ensure_period(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<()> {
    if end < start {
        return Err(DomainError::validation(format!(
            "end date {end} is before start date {start}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn counts_calendar_boundaries_not_elapsed_hours() {
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 1, 2, 1, 0, 0).unwrap();
        assert_eq!(calendar_days_between(late, early), 1);
        assert_eq!(calendar_days_between(early, late), -1);
        assert_eq!(calendar_days_between(late, late + Duration::days(90)), 90);
    }

    #[test]
    fn rejects_inverted_period() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert!(ensure_period(start, start).is_ok());
        assert!(matches!(
            ensure_period(start, start - Duration::seconds(1)),
            Err(DomainError::Validation(_))
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn whole_day_offsets_are_exact(
                base_secs in 0i64..4_000_000_000,
                days in -3650i64..3650,
            ) {
                let from = DateTime::<Utc>::from_timestamp(base_secs, 0).unwrap();
                let to = from + Duration::days(days);
                prop_assert_eq!(calendar_days_between(from, to), days);
                prop_assert_eq!(calendar_days_between(to, from), -days);
            }

            #[test]
            fn same_date_is_zero_days(base_secs in 0i64..4_000_000_000, hour in 0u32..24) {
                let t = DateTime::<Utc>::from_timestamp(base_secs, 0).unwrap();
                let midnight = t.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc();
                let later = midnight + Duration::hours(i64::from(hour));
                prop_assert_eq!(calendar_days_between(t, later), 0);
            }
        }
    }
}
