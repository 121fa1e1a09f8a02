// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking rules applied per profile by the weekly allocator.
//!
//! ## Rules
//!
//! - Quota: `senior` 6, `17-18` 5, `15-16` 4, `0-14` 3, anything else 3
//! - Preferred window: morning `[08:00, 12:00)`, afternoon `[12:00, 17:00)`,
//!   evening `[17:00, 23:00)`, no preference `[08:00, 23:00)`
//! - Age partition: senior slots start before 14:30, every other category
//!   starts at or after 14:30
//!
//! A slot qualifies for a profile only if its start time satisfies both the
//! preferred window and the age partition. Only the slot start is tested.

use crate::slots::TimeSlot;
use crate::types::{AgeCategory, PreferredInterval};
use serde::{Deserialize, Serialize};

const fn minute_of_day(hour: u16, minute: u16) -> u16 {
    hour * 60 + minute
}

/// A half-open range of minutes after midnight, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: u16,
    end: u16,
}

impl TimeWindow {
    /// Creates a window from `start` (inclusive) to `end` (exclusive).
    #[must_use]
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Creates a window from wall-clock hours and minutes.
    #[must_use]
    pub const fn from_hm(start: (u16, u16), end: (u16, u16)) -> Self {
        Self::new(minute_of_day(start.0, start.1), minute_of_day(end.0, end.1))
    }

    /// Returns whether `minute` falls inside the window.
    #[must_use]
    pub const fn contains(&self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }

    /// Returns whether the slot starts inside the window.
    #[must_use]
    pub fn admits(&self, slot: TimeSlot) -> bool {
        self.contains(slot.start_minute())
    }
}

/// Tunable constants of the weekly allocation.
///
/// `AllocationPolicy::default()` is the production rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Weekly quota per age category.
    pub senior_quota: u8,
    /// Weekly quota for `17-18`.
    pub under18_quota: u8,
    /// Weekly quota for `15-16`.
    pub under16_quota: u8,
    /// Weekly quota for `0-14`.
    pub under14_quota: u8,
    /// Weekly quota for unrecognized categories.
    pub fallback_quota: u8,
    /// Window for `morning`.
    pub morning: TimeWindow,
    /// Window for `afternoon`.
    pub afternoon: TimeWindow,
    /// Window for `evening`.
    pub evening: TimeWindow,
    /// Window when no preference is set.
    pub full_day: TimeWindow,
    /// Minute of day separating senior slots (before) from junior slots (at or after).
    pub age_partition_cutoff: u16,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            senior_quota: 6,
            under18_quota: 5,
            under16_quota: 4,
            under14_quota: 3,
            fallback_quota: 3,
            morning: TimeWindow::from_hm((8, 0), (12, 0)),
            afternoon: TimeWindow::from_hm((12, 0), (17, 0)),
            evening: TimeWindow::from_hm((17, 0), (23, 0)),
            full_day: TimeWindow::from_hm((8, 0), (23, 0)),
            age_partition_cutoff: minute_of_day(14, 30),
        }
    }
}

impl AllocationPolicy {
    /// Maximum number of reservations a profile may receive in one week.
    #[must_use]
    pub const fn quota(&self, category: &AgeCategory) -> u8 {
        match category {
            AgeCategory::Senior => self.senior_quota,
            AgeCategory::Under18 => self.under18_quota,
            AgeCategory::Under16 => self.under16_quota,
            AgeCategory::Under14 => self.under14_quota,
            AgeCategory::Unrecognized(_) => self.fallback_quota,
        }
    }

    /// The window a profile's preferred interval maps to.
    #[must_use]
    pub const fn window(&self, interval: PreferredInterval) -> TimeWindow {
        match interval {
            PreferredInterval::Morning => self.morning,
            PreferredInterval::Afternoon => self.afternoon,
            PreferredInterval::Evening => self.evening,
            PreferredInterval::FullDay => self.full_day,
        }
    }

    /// Returns whether the slot lies on the category's side of the age partition.
    #[must_use]
    pub fn within_age_partition(&self, category: &AgeCategory, slot: TimeSlot) -> bool {
        if category.is_senior() {
            slot.start_minute() < self.age_partition_cutoff
        } else {
            slot.start_minute() >= self.age_partition_cutoff
        }
    }

    /// Returns whether the slot is acceptable to a profile with the given
    /// category and preferred interval.
    #[must_use]
    pub fn admits(
        &self,
        category: &AgeCategory,
        interval: PreferredInterval,
        slot: TimeSlot,
    ) -> bool {
        self.window(interval).admits(slot) && self.within_age_partition(category, slot)
    }

    /// Lists the catalog slots acceptable to a profile, in chronological order.
    #[must_use]
    pub fn candidate_slots(
        &self,
        category: &AgeCategory,
        interval: PreferredInterval,
    ) -> Vec<TimeSlot> {
        TimeSlot::all()
            .filter(|slot| self.admits(category, interval, *slot))
            .collect()
    }
}
