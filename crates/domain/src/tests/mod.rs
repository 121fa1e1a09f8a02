// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{
    AccountStatus, AgeCategory, Money, PreferredInterval, ReservationProfile, TeamOwner, Venue,
    VenueStatus,
};

pub fn create_test_owner(user_id: i64) -> TeamOwner {
    TeamOwner {
        user_id,
        display_name: format!("Team {user_id}"),
        team_type: Some(String::from("volleyball")),
        account_status: AccountStatus::Active,
    }
}

pub fn create_test_profile(
    profile_id: i64,
    category: &str,
    budget: u64,
    interval: PreferredInterval,
) -> ReservationProfile {
    ReservationProfile {
        profile_id,
        owner_user_id: profile_id,
        age_category: AgeCategory::from(category),
        weekly_budget: Money::new(budget),
        preferred_interval: interval,
        city: String::from("Cluj"),
        venue_ids: vec![1, 2],
    }
}

pub fn create_test_venue(venue_id: i64, tariff: u64) -> Venue {
    Venue {
        venue_id,
        name: format!("Hall {venue_id}"),
        city: String::from("Cluj"),
        tariff: Money::new(tariff),
        status: VenueStatus::Active,
    }
}
