// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Run-local availability grid.
//!
//! `venue -> date -> slot -> available`, covering every known venue for the
//! seven dates of the target week. Built fresh for each regeneration run,
//! seeded from persisted reservations, mutated as the allocator commits
//! bookings, and dropped when the run ends. The persisted reservation table
//! remains the source of truth.

use courtbook_domain::{BookingWeek, Reservation, SLOT_COUNT, TimeSlot, Venue};
use std::collections::{BTreeMap, HashMap};
use time::Date;
use tracing::debug;

type DayGrid = [bool; SLOT_COUNT];

/// Availability of every (venue, date, slot) triple in one booking week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityCalendar {
    week: BookingWeek,
    grid: HashMap<i64, BTreeMap<Date, DayGrid>>,
}

impl AvailabilityCalendar {
    /// Creates a calendar with every slot of every listed venue available.
    #[must_use]
    pub fn new(week: BookingWeek, venue_ids: impl IntoIterator<Item = i64>) -> Self {
        let grid: HashMap<i64, BTreeMap<Date, DayGrid>> = venue_ids
            .into_iter()
            .map(|venue_id| {
                let days: BTreeMap<Date, DayGrid> = week
                    .dates()
                    .iter()
                    .map(|date| (*date, [true; SLOT_COUNT]))
                    .collect();
                (venue_id, days)
            })
            .collect();

        Self { week, grid }
    }

    /// Creates a calendar for `venues` and blocks every slot occupied by
    /// `existing`.
    #[must_use]
    pub fn build(week: BookingWeek, venues: &[Venue], existing: &[Reservation]) -> Self {
        let mut calendar: Self = Self::new(week, venues.iter().map(|venue| venue.venue_id));
        let blocked: usize = calendar.seed(existing);
        debug!(
            week = %week,
            venues = venues.len(),
            existing = existing.len(),
            blocked,
            "Built availability calendar"
        );
        calendar
    }

    /// Marks the slot of every reservation in the week as taken.
    ///
    /// Reservation kind is not consulted: maintenance blocks occupy their
    /// slot exactly like team bookings. Records outside the week or for
    /// unknown venues are ignored.
    ///
    /// Returns the number of slots that changed from available to taken.
    pub fn seed(&mut self, existing: &[Reservation]) -> usize {
        let mut blocked: usize = 0;
        for reservation in existing {
            if self.week.contains(reservation.date)
                && self.mark_unavailable(reservation.venue_id, reservation.date, reservation.slot)
            {
                blocked += 1;
            }
        }
        blocked
    }

    /// The week this calendar covers.
    #[must_use]
    pub const fn week(&self) -> &BookingWeek {
        &self.week
    }

    /// Returns whether the calendar has an entry for the venue on `date`.
    #[must_use]
    pub fn has_day(&self, venue_id: i64, date: Date) -> bool {
        self.day(venue_id, date).is_some()
    }

    /// Returns whether the slot is free. Unknown triples are never free.
    #[must_use]
    pub fn is_available(&self, venue_id: i64, date: Date, slot: TimeSlot) -> bool {
        self.day(venue_id, date)
            .is_some_and(|day| day[slot.index()])
    }

    /// Lists the free slots of a venue on `date`, in chronological order.
    #[must_use]
    pub fn available_slots(&self, venue_id: i64, date: Date) -> Vec<TimeSlot> {
        self.day(venue_id, date).map_or_else(Vec::new, |day| {
            TimeSlot::all().filter(|slot| day[slot.index()]).collect()
        })
    }

    /// Marks a slot as taken.
    ///
    /// Returns `true` if the slot was free before the call.
    pub fn mark_unavailable(&mut self, venue_id: i64, date: Date, slot: TimeSlot) -> bool {
        self.grid
            .get_mut(&venue_id)
            .and_then(|days| days.get_mut(&date))
            .is_some_and(|day| std::mem::replace(&mut day[slot.index()], false))
    }

    /// Number of free slots across the whole calendar.
    #[must_use]
    pub fn free_slot_count(&self) -> usize {
        self.grid
            .values()
            .flat_map(BTreeMap::values)
            .map(|day| day.iter().filter(|free| **free).count())
            .sum()
    }

    fn day(&self, venue_id: i64, date: Date) -> Option<&DayGrid> {
        self.grid.get(&venue_id).and_then(|days| days.get(&date))
    }
}
