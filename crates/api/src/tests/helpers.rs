// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use courtbook_domain::{
    AccountStatus, AgeCategory, Money, PreferredInterval, ReservationProfile, Venue, VenueStatus,
};
use courtbook_persistence::Persistence;
use time::Date;
use time::macros::date;

/// A Thursday; the following week runs 2026-10-19..=2026-10-25.
pub const TEST_TODAY: Date = date!(2026 - 10 - 15);

pub struct TestSetup {
    pub persistence: Persistence,
    pub h1: i64,
    pub h2: i64,
    pub team: i64,
}

pub fn create_test_venue(name: &str, tariff: u64) -> Venue {
    Venue {
        venue_id: 0,
        name: name.to_string(),
        city: String::from("Cluj"),
        tariff: Money::new(tariff),
        status: VenueStatus::Active,
    }
}

pub fn create_test_profile(owner_user_id: i64, venue_ids: Vec<i64>) -> ReservationProfile {
    ReservationProfile {
        profile_id: 0,
        owner_user_id,
        age_category: AgeCategory::from("senior"),
        weekly_budget: Money::new(600),
        preferred_interval: PreferredInterval::Morning,
        city: String::from("Cluj"),
        venue_ids,
    }
}

/// Two Cluj halls and one senior team with a morning preference.
pub fn create_test_setup() -> TestSetup {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let h1: i64 = persistence
        .create_venue(&create_test_venue("H1", 100))
        .unwrap();
    let h2: i64 = persistence
        .create_venue(&create_test_venue("H2", 80))
        .unwrap();
    let team: i64 = persistence
        .create_user("U Cluj", Some("basketball"), &AccountStatus::Verified)
        .unwrap();
    persistence
        .create_profile(&create_test_profile(team, vec![h1, h2]))
        .unwrap();

    TestSetup {
        persistence,
        h1,
        h2,
        team,
    }
}
