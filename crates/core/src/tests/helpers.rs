// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ReservationStore;
use courtbook_domain::{
    AccountStatus, AgeCategory, BookingWeek, Money, PreferredInterval, Reservation,
    ReservationProfile, TeamOwner, TimeSlot, Venue, VenueStatus,
};
use std::collections::HashSet;
use time::Date;
use time::macros::date;

/// A Thursday; the following week runs 2026-10-19..=2026-10-25.
pub const TEST_TODAY: Date = date!(2026 - 10 - 15);

pub fn create_test_week() -> BookingWeek {
    BookingWeek::starting(date!(2026 - 10 - 19)).unwrap()
}

/// The catalog slot starting at `start` (`"HH:MM"`).
pub fn slot(start: &str) -> TimeSlot {
    TimeSlot::all()
        .find(|candidate| candidate.label().starts_with(start))
        .unwrap()
}

pub fn create_test_owner(user_id: i64) -> TeamOwner {
    TeamOwner {
        user_id,
        display_name: format!("Team {user_id}"),
        team_type: Some(String::from("volleyball")),
        account_status: AccountStatus::Verified,
    }
}

pub fn create_test_venue(venue_id: i64, city: &str, tariff: u64) -> Venue {
    Venue {
        venue_id,
        name: format!("Hall {venue_id}"),
        city: city.to_string(),
        tariff: Money::new(tariff),
        status: VenueStatus::Active,
    }
}

pub fn create_test_profile(
    profile_id: i64,
    category: &str,
    budget: u64,
    interval: PreferredInterval,
    venue_ids: Vec<i64>,
) -> ReservationProfile {
    ReservationProfile {
        profile_id,
        owner_user_id: profile_id,
        age_category: AgeCategory::from(category),
        weekly_budget: Money::new(budget),
        preferred_interval: interval,
        city: String::from("Cluj"),
        venue_ids,
    }
}

/// Store failure raised by `MemoryStore` when a fault is injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure(pub &'static str);

impl std::fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "injected failure: {}", self.0)
    }
}

impl std::error::Error for StoreFailure {}

/// In-memory `ReservationStore` with optional fault injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub owners: Vec<TeamOwner>,
    pub venues: Vec<Venue>,
    pub profiles: Vec<ReservationProfile>,
    pub reservations: Vec<Reservation>,
    pub fail_load: bool,
    pub fail_delete: bool,
    pub fail_persist: bool,
    pub persist_calls: usize,
    next_id: i64,
}

impl MemoryStore {
    /// Stores a reservation directly, assigning an ID.
    pub fn insert(&mut self, reservation: Reservation) -> Reservation {
        self.next_id += 1;
        let stored: Reservation = reservation.with_id(self.next_id);
        self.reservations.push(stored.clone());
        stored
    }

    /// A profile per owner with a matching eligible owner record.
    pub fn add_team(&mut self, profile: ReservationProfile) {
        self.owners.push(create_test_owner(profile.owner_user_id));
        self.profiles.push(profile);
    }

    pub fn bookings_in(&self, week: &BookingWeek) -> Vec<Reservation> {
        self.reservations
            .iter()
            .filter(|reservation| reservation.is_booking() && week.contains(reservation.date))
            .cloned()
            .collect()
    }
}

impl ReservationStore for MemoryStore {
    type Error = StoreFailure;

    fn list_candidate_profiles(&mut self) -> Result<Vec<ReservationProfile>, Self::Error> {
        if self.fail_load {
            return Err(StoreFailure("load"));
        }
        Ok(self.profiles.clone())
    }

    fn list_team_owners(&mut self) -> Result<Vec<TeamOwner>, Self::Error> {
        Ok(self.owners.clone())
    }

    fn list_venues(&mut self) -> Result<Vec<Venue>, Self::Error> {
        Ok(self.venues.clone())
    }

    fn list_reservations_in_week(
        &mut self,
        week: &BookingWeek,
    ) -> Result<Vec<Reservation>, Self::Error> {
        Ok(self
            .reservations
            .iter()
            .filter(|reservation| week.contains(reservation.date))
            .cloned()
            .collect())
    }

    fn delete_reservations(&mut self, reservations: &[Reservation]) -> Result<usize, Self::Error> {
        if self.fail_delete {
            return Err(StoreFailure("delete"));
        }
        let ids: HashSet<Option<i64>> = reservations
            .iter()
            .map(|reservation| reservation.reservation_id)
            .collect();
        let before: usize = self.reservations.len();
        self.reservations
            .retain(|reservation| !ids.contains(&reservation.reservation_id));
        Ok(before - self.reservations.len())
    }

    fn persist_reservations(
        &mut self,
        reservations: &[Reservation],
    ) -> Result<Vec<Reservation>, Self::Error> {
        self.persist_calls += 1;
        if self.fail_persist {
            return Err(StoreFailure("persist"));
        }

        let mut taken: HashSet<(i64, Date, usize)> = self
            .reservations
            .iter()
            .map(|r| (r.venue_id, r.date, r.slot.index()))
            .collect();
        for reservation in reservations {
            if !taken.insert((reservation.venue_id, reservation.date, reservation.slot.index())) {
                return Err(StoreFailure("unique constraint"));
            }
        }

        Ok(reservations
            .iter()
            .map(|reservation| self.insert(reservation.clone()))
            .collect())
    }
}
