// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly regeneration trigger.
//!
//! Sleeps until the configured weekday and hour in the operator's timezone,
//! then runs regeneration through the same run lock as the HTTP trigger.
//! A failed or refused run is logged and the next week is scheduled; there
//! are no retries.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use courtbook_domain::DomainError;
use time::{Date, Month};
use tracing::{error, info, warn};

use crate::{AppState, run_regeneration};

/// When the weekly run fires, in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklySchedule {
    /// Day of the week.
    pub weekday: Weekday,
    /// Hour of the day, 0-23.
    pub hour: u32,
}

impl WeeklySchedule {
    /// Returns the first scheduled instant strictly after `now`.
    ///
    /// A local time skipped by a DST transition moves the run to the
    /// following week. Returns `None` only if the hour is out of range.
    #[must_use]
    pub fn next_run_after(&self, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
        let tz: Tz = now.timezone();
        let today: NaiveDate = now.date_naive();

        (0..=14_u64)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .filter(|date| date.weekday() == self.weekday)
            .filter_map(|date| date.and_hms_opt(self.hour, 0, 0))
            .filter_map(|naive| tz.from_local_datetime(&naive).earliest())
            .find(|candidate| *candidate > now)
    }
}

/// Converts a chrono calendar date to a `time` date.
///
/// # Errors
///
/// Returns an error if the date is outside the range `time` supports.
pub fn to_calendar_date(date: NaiveDate) -> Result<Date, DomainError> {
    let rejected = |error: String| DomainError::DateParseError {
        date_string: date.to_string(),
        error,
    };

    let month: Month = u8::try_from(date.month())
        .map_err(|e| rejected(e.to_string()))
        .and_then(|month| Month::try_from(month).map_err(|e| rejected(e.to_string())))?;
    let day: u8 = u8::try_from(date.day()).map_err(|e| rejected(e.to_string()))?;

    Date::from_calendar_date(date.year(), month, day).map_err(|e| rejected(e.to_string()))
}

/// Returns today's date in `tz`.
#[must_use]
pub fn local_today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Runs regeneration once a week, forever.
pub async fn run_weekly(state: AppState, schedule: WeeklySchedule) {
    loop {
        let now: DateTime<Tz> = Utc::now().with_timezone(&state.timezone);
        let Some(next) = schedule.next_run_after(now) else {
            error!(?schedule, "Weekly schedule has no valid run time; scheduler stopped");
            return;
        };

        info!(next_run = %next, "Scheduled next weekly regeneration");
        let wait: std::time::Duration = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        let today: Date = match to_calendar_date(next.date_naive()) {
            Ok(today) => today,
            Err(e) => {
                error!(error = %e, "Scheduled run date is out of range");
                continue;
            }
        };

        match run_regeneration(&state, today).await {
            Ok(response) => info!(
                week_start = %response.week_start,
                count = response.count,
                skipped = response.skipped.len(),
                "Scheduled regeneration completed"
            ),
            Err(e) => warn!(error = %e, "Scheduled regeneration failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Bucharest;
    use time::macros::date;

    const SUNDAY_EVENING: WeeklySchedule = WeeklySchedule {
        weekday: Weekday::Sun,
        hour: 20,
    };

    fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
        Bucharest
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn test_next_run_later_in_the_week() {
        let next: DateTime<Tz> = SUNDAY_EVENING
            .next_run_after(local(2026, 10, 15, 12, 0))
            .unwrap();
        assert_eq!(next, local(2026, 10, 18, 20, 0));
    }

    #[test]
    fn test_next_run_later_the_same_day() {
        let next: DateTime<Tz> = SUNDAY_EVENING
            .next_run_after(local(2026, 10, 18, 19, 59))
            .unwrap();
        assert_eq!(next, local(2026, 10, 18, 20, 0));
    }

    #[test]
    fn test_run_instant_schedules_the_following_week() {
        let next: DateTime<Tz> = SUNDAY_EVENING
            .next_run_after(local(2026, 10, 18, 20, 0))
            .unwrap();
        assert_eq!(next, local(2026, 10, 25, 20, 0));
    }

    #[test]
    fn test_next_run_across_dst_change() {
        // Bucharest leaves summer time at 04:00 on 2026-10-25.
        let next: DateTime<Tz> = SUNDAY_EVENING
            .next_run_after(local(2026, 10, 24, 9, 0))
            .unwrap();
        assert_eq!(next, local(2026, 10, 25, 20, 0));
        assert_eq!(next.naive_utc().to_string(), "2026-10-25 18:00:00");
    }

    #[test]
    fn test_invalid_hour_has_no_run() {
        let schedule: WeeklySchedule = WeeklySchedule {
            weekday: Weekday::Sun,
            hour: 24,
        };
        assert!(schedule.next_run_after(local(2026, 10, 15, 12, 0)).is_none());
    }

    #[test]
    fn test_to_calendar_date() {
        let converted: Date =
            to_calendar_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()).unwrap();
        assert_eq!(converted, date!(2026 - 10 - 19));

        let leap: Date = to_calendar_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()).unwrap();
        assert_eq!(leap, date!(2024 - 02 - 29));

        let year_end: Date =
            to_calendar_date(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()).unwrap();
        assert_eq!(year_end, date!(2026 - 12 - 31));
    }

    #[test]
    fn test_dates_beyond_calendar_range_are_rejected() {
        let far: NaiveDate = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();

        assert!(matches!(
            to_calendar_date(far),
            Err(DomainError::DateParseError { .. })
        ));
    }
}
