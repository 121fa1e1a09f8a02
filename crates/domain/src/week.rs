// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Monday-to-Sunday week a regeneration run targets.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Weekday};

/// Number of days in a booking week.
pub const DAYS_PER_WEEK: usize = 7;

/// Seven consecutive dates, Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingWeek {
    dates: [Date; DAYS_PER_WEEK],
}

impl BookingWeek {
    /// Returns the week starting on the first Monday strictly after `today`.
    ///
    /// A run on a Monday targets the Monday one week later.
    ///
    /// # Errors
    ///
    /// Returns an error if the date range overflows the calendar.
    pub fn following(today: Date) -> Result<Self, DomainError> {
        let days_since_monday: i64 = i64::from(today.weekday().number_days_from_monday());
        let days_until_next_monday: i64 = 7 - days_since_monday;

        let monday: Date = today
            .checked_add(Duration::days(days_until_next_monday))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("finding the Monday after {today}"),
            })?;

        Self::starting(monday)
    }

    /// Returns the week starting on `monday`.
    ///
    /// # Errors
    ///
    /// Returns an error if `monday` is not a Monday or the week overflows
    /// the calendar.
    pub fn starting(monday: Date) -> Result<Self, DomainError> {
        if monday.weekday() != Weekday::Monday {
            return Err(DomainError::InvalidWeekStart {
                start_date: monday,
                weekday: monday.weekday(),
            });
        }

        let mut dates: [Date; DAYS_PER_WEEK] = [monday; DAYS_PER_WEEK];
        for (offset, slot) in (0_i64..).zip(dates.iter_mut()) {
            *slot = monday.checked_add(Duration::days(offset)).ok_or_else(|| {
                DomainError::DateArithmeticOverflow {
                    operation: format!("building the week of {monday}"),
                }
            })?;
        }

        Ok(Self { dates })
    }

    /// The Monday the week starts on.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.dates[0]
    }

    /// The Sunday the week ends on (inclusive).
    #[must_use]
    pub const fn end(&self) -> Date {
        self.dates[DAYS_PER_WEEK - 1]
    }

    /// All seven dates in order.
    #[must_use]
    pub const fn dates(&self) -> &[Date; DAYS_PER_WEEK] {
        &self.dates
    }

    /// Returns whether `date` falls inside the week.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start() <= date && date <= self.end()
    }
}

impl std::fmt::Display for BookingWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start(), self.end())
    }
}
