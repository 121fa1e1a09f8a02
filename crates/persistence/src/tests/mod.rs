// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use courtbook_domain::{
    AccountStatus, AgeCategory, BookingWeek, Money, PreferredInterval, ReservationProfile,
    TimeSlot, Venue, VenueStatus,
};
use time::Date;
use time::macros::date;

/// A Thursday; the following week runs 2026-10-19..=2026-10-25.
pub const TEST_TODAY: Date = date!(2026 - 10 - 15);

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_week() -> BookingWeek {
    BookingWeek::starting(date!(2026 - 10 - 19)).unwrap()
}

pub fn slot(start: &str) -> TimeSlot {
    TimeSlot::all()
        .find(|candidate| candidate.label().starts_with(start))
        .unwrap()
}

pub fn create_test_venue(name: &str, city: &str, tariff: u64) -> Venue {
    Venue {
        venue_id: 0,
        name: name.to_string(),
        city: city.to_string(),
        tariff: Money::new(tariff),
        status: VenueStatus::Active,
    }
}

pub fn create_test_profile(
    owner_user_id: i64,
    category: &str,
    budget: u64,
    interval: PreferredInterval,
    venue_ids: Vec<i64>,
) -> ReservationProfile {
    ReservationProfile {
        profile_id: 0,
        owner_user_id,
        age_category: AgeCategory::from(category),
        weekly_budget: Money::new(budget),
        preferred_interval: interval,
        city: String::from("Cluj"),
        venue_ids,
    }
}

/// Two Cluj halls (H1 at 100, H2 at 80) and one eligible team.
pub struct Fixture {
    pub persistence: Persistence,
    pub h1: i64,
    pub h2: i64,
    pub team: i64,
}

pub fn create_cluj_fixture() -> Fixture {
    let mut persistence: Persistence = create_test_persistence();
    let h1: i64 = persistence
        .create_venue(&create_test_venue("H1", "Cluj", 100))
        .unwrap();
    let h2: i64 = persistence
        .create_venue(&create_test_venue("H2", "Cluj", 80))
        .unwrap();
    let team: i64 = persistence
        .create_user("Dinamo Cluj", Some("volleyball"), &AccountStatus::Active)
        .unwrap();
    persistence
        .create_profile(&create_test_profile(
            team,
            "senior",
            600,
            PreferredInterval::FullDay,
            vec![h1, h2],
        ))
        .unwrap();

    Fixture {
        persistence,
        h1,
        h2,
        team,
    }
}
