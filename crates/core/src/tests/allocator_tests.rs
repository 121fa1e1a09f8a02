// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_profile, create_test_venue, create_test_week, slot};
use crate::{Allocation, AvailabilityCalendar, SkipReason, allocate_week};
use courtbook_domain::{
    AllocationPolicy, Money, PreferredInterval, RankedProfile, Reservation, ReservationKind,
    ReservationProfile, ReservationStatus, Venue, rank_profiles,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use time::Date;

fn run_allocation(
    profiles: Vec<ReservationProfile>,
    venues: &[Venue],
    existing: &[Reservation],
    seed: u64,
) -> (Allocation, AvailabilityCalendar) {
    let policy: AllocationPolicy = AllocationPolicy::default();
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    let mut calendar: AvailabilityCalendar =
        AvailabilityCalendar::build(create_test_week(), venues, existing);
    let ranked: Vec<RankedProfile> = rank_profiles(profiles, &mut rng);
    let allocation: Allocation = allocate_week(&policy, &ranked, venues, &mut calendar, &mut rng);
    (allocation, calendar)
}

#[test]
fn test_senior_team_with_two_halls_gets_full_quota() {
    let venues: Vec<Venue> = vec![
        create_test_venue(1, "Cluj", 100),
        create_test_venue(2, "Cluj", 80),
    ];
    let profile: ReservationProfile =
        create_test_profile(1, "senior", 600, PreferredInterval::FullDay, vec![1, 2]);

    for seed in 0..16 {
        let (allocation, _) = run_allocation(vec![profile.clone()], &venues, &[], seed);

        assert_eq!(allocation.reservations.len(), 6);
        let dates: HashSet<Date> = allocation.reservations.iter().map(|r| r.date).collect();
        assert_eq!(dates.len(), 6);

        let spent: Money = allocation.reservations.iter().map(|r| r.price).sum();
        assert!(spent <= Money::new(600));
        assert_eq!(allocation.summaries[0].spent, spent);
        assert_eq!(allocation.summaries[0].granted, 6);

        for reservation in &allocation.reservations {
            assert!(reservation.slot.start_minute() < 870);
            assert!(reservation.slot.start_minute() >= 480);
            assert_eq!(reservation.owner_user_id, 1);
            assert_eq!(reservation.kind, ReservationKind::Reservation);
            assert_eq!(reservation.status, ReservationStatus::Pending);
            assert_eq!(reservation.reservation_id, None);
        }
    }
}

#[test]
fn test_reservation_price_is_venue_tariff() {
    let venues: Vec<Venue> = vec![
        create_test_venue(1, "Cluj", 100),
        create_test_venue(2, "Cluj", 80),
    ];
    let profile: ReservationProfile =
        create_test_profile(1, "senior", 600, PreferredInterval::FullDay, vec![1, 2]);

    let (allocation, _) = run_allocation(vec![profile], &venues, &[], 3);

    for reservation in &allocation.reservations {
        let expected: Money = if reservation.venue_id == 1 {
            Money::new(100)
        } else {
            Money::new(80)
        };
        assert_eq!(reservation.price, expected);
    }
}

#[test]
fn test_budget_caps_reservations() {
    let venues: Vec<Venue> = vec![create_test_venue(1, "Cluj", 100)];
    let profile: ReservationProfile =
        create_test_profile(1, "senior", 250, PreferredInterval::FullDay, vec![1]);

    let (allocation, _) = run_allocation(vec![profile], &venues, &[], 11);

    assert_eq!(allocation.reservations.len(), 2);
    assert_eq!(allocation.summaries[0].spent, Money::new(200));
}

#[test]
fn test_zero_budget_gets_nothing_unless_venue_is_free() {
    let paid: Vec<Venue> = vec![create_test_venue(1, "Cluj", 100)];
    let free: Vec<Venue> = vec![create_test_venue(1, "Cluj", 0)];
    let profile: ReservationProfile =
        create_test_profile(1, "0-14", 0, PreferredInterval::FullDay, vec![1]);

    let (paid_allocation, _) = run_allocation(vec![profile.clone()], &paid, &[], 5);
    let (free_allocation, _) = run_allocation(vec![profile], &free, &[], 5);

    assert!(paid_allocation.reservations.is_empty());
    assert_eq!(free_allocation.reservations.len(), 3);
}

#[test]
fn test_quota_follows_age_category() {
    let venues: Vec<Venue> = vec![create_test_venue(1, "Cluj", 10)];
    let expectations: [(&str, usize); 5] = [
        ("senior", 6),
        ("17-18", 5),
        ("15-16", 4),
        ("0-14", 3),
        ("veterans", 3),
    ];

    for (category, quota) in expectations {
        let profile: ReservationProfile =
            create_test_profile(1, category, 10_000, PreferredInterval::FullDay, vec![1]);
        let (allocation, _) = run_allocation(vec![profile], &venues, &[], 2);
        assert_eq!(allocation.reservations.len(), quota, "category {category}");
    }
}

#[test]
fn test_empty_window_yields_zero_reservations() {
    let venues: Vec<Venue> = vec![create_test_venue(1, "Cluj", 10)];
    let senior_evening: ReservationProfile =
        create_test_profile(1, "senior", 1_000, PreferredInterval::Evening, vec![1]);
    let junior_morning: ReservationProfile =
        create_test_profile(2, "15-16", 1_000, PreferredInterval::Morning, vec![1]);

    let (allocation, _) = run_allocation(vec![senior_evening, junior_morning], &venues, &[], 8);

    assert!(allocation.reservations.is_empty());
    assert!(allocation.skipped.is_empty());
    assert_eq!(allocation.summaries.len(), 2);
    assert!(allocation.summaries.iter().all(|summary| summary.granted == 0));
}

#[test]
fn test_missing_venue_skips_whole_profile() {
    let venues: Vec<Venue> = vec![create_test_venue(1, "Cluj", 10)];
    let profile: ReservationProfile =
        create_test_profile(4, "senior", 1_000, PreferredInterval::FullDay, vec![1, 42]);

    let (allocation, _) = run_allocation(vec![profile], &venues, &[], 1);

    assert!(allocation.reservations.is_empty());
    assert_eq!(allocation.skipped.len(), 1);
    assert_eq!(allocation.skipped[0].profile_id, 4);
    assert_eq!(
        allocation.skipped[0].reason,
        SkipReason::VenueMissing { venue_id: 42 }
    );
}

#[test]
fn test_venues_outside_profile_city_are_ignored() {
    let venues: Vec<Venue> = vec![
        create_test_venue(1, "Iasi", 10),
        create_test_venue(2, "Cluj", 10),
    ];
    let only_iasi: ReservationProfile =
        create_test_profile(1, "senior", 1_000, PreferredInterval::FullDay, vec![1]);
    let mixed: ReservationProfile =
        create_test_profile(2, "senior", 1_000, PreferredInterval::FullDay, vec![1, 2]);

    let (allocation, _) = run_allocation(vec![only_iasi, mixed], &venues, &[], 4);

    assert_eq!(allocation.skipped.len(), 1);
    assert_eq!(allocation.skipped[0].profile_id, 1);
    assert_eq!(allocation.skipped[0].reason, SkipReason::NoVenueInCity);
    assert_eq!(allocation.reservations.len(), 6);
    assert!(allocation.reservations.iter().all(|r| r.venue_id == 2));
}

#[test]
fn test_profile_without_venues_is_skipped() {
    let venues: Vec<Venue> = vec![create_test_venue(1, "Cluj", 10)];
    let profile: ReservationProfile =
        create_test_profile(1, "senior", 1_000, PreferredInterval::FullDay, Vec::new());

    let (allocation, _) = run_allocation(vec![profile], &venues, &[], 4);

    assert!(allocation.reservations.is_empty());
    assert_eq!(allocation.skipped[0].reason, SkipReason::NoVenueInCity);
}

#[test]
fn test_higher_priority_takes_last_free_slot() {
    let venues: Vec<Venue> = vec![create_test_venue(1, "Cluj", 50)];
    let week_dates: Vec<Date> = create_test_week().dates().to_vec();

    // Block everything except Wednesday 10:00.
    let mut existing: Vec<Reservation> = Vec::new();
    for date in &week_dates {
        for candidate in courtbook_domain::TimeSlot::all() {
            if *date == week_dates[2] && candidate == slot("10:00") {
                continue;
            }
            existing.push(Reservation::maintenance(1, 99, *date, candidate));
        }
    }

    let rich: ReservationProfile =
        create_test_profile(1, "senior", 900, PreferredInterval::Morning, vec![1]);
    let poor: ReservationProfile =
        create_test_profile(2, "senior", 300, PreferredInterval::Morning, vec![1]);
    let junior: ReservationProfile =
        create_test_profile(3, "17-18", 5_000, PreferredInterval::FullDay, vec![1]);

    for seed in 0..32 {
        let (allocation, calendar) = run_allocation(
            vec![junior.clone(), poor.clone(), rich.clone()],
            &venues,
            &existing,
            seed,
        );

        assert_eq!(allocation.reservations.len(), 1);
        assert_eq!(allocation.reservations[0].owner_user_id, 1);
        assert_eq!(allocation.reservations[0].date, week_dates[2]);
        assert_eq!(allocation.reservations[0].slot, slot("10:00"));
        assert_eq!(calendar.free_slot_count(), 0);
    }
}

#[test]
fn test_allocation_never_overlaps_existing_reservations() {
    let venues: Vec<Venue> = vec![create_test_venue(1, "Cluj", 10)];
    let week_dates: Vec<Date> = create_test_week().dates().to_vec();
    let existing: Vec<Reservation> = week_dates
        .iter()
        .flat_map(|date| {
            [
                Reservation::maintenance(1, 99, *date, slot("08:30")),
                Reservation::booking(1, 50, *date, slot("10:00"), Money::new(10)),
            ]
        })
        .collect();
    let profile: ReservationProfile =
        create_test_profile(1, "senior", 1_000, PreferredInterval::Morning, vec![1]);

    let (allocation, _) = run_allocation(vec![profile], &venues, &existing, 9);

    assert_eq!(allocation.reservations.len(), 6);
    assert!(
        allocation
            .reservations
            .iter()
            .all(|reservation| reservation.slot == slot("11:30"))
    );
}

#[test]
fn test_same_seed_reproduces_allocation() {
    let venues: Vec<Venue> = vec![
        create_test_venue(1, "Cluj", 100),
        create_test_venue(2, "Cluj", 80),
    ];
    let profiles: Vec<ReservationProfile> = vec![
        create_test_profile(1, "senior", 600, PreferredInterval::FullDay, vec![1, 2]),
        create_test_profile(2, "17-18", 400, PreferredInterval::Evening, vec![1, 2]),
        create_test_profile(3, "0-14", 300, PreferredInterval::FullDay, vec![2]),
    ];

    let (first, _) = run_allocation(profiles.clone(), &venues, &[], 77);
    let (second, _) = run_allocation(profiles, &venues, &[], 77);

    assert_eq!(first, second);
}

#[test]
fn test_skip_reason_wire_format() {
    let missing: serde_json::Value =
        serde_json::to_value(SkipReason::VenueMissing { venue_id: 12 }).unwrap();
    assert_eq!(
        missing,
        serde_json::json!({ "kind": "venue_missing", "venue_id": 12 })
    );

    let ineligible: serde_json::Value = serde_json::to_value(SkipReason::Ineligible {
        reason: courtbook_domain::Ineligibility::NoTeamType,
    })
    .unwrap();
    assert_eq!(
        ineligible,
        serde_json::json!({ "kind": "ineligible", "reason": { "reason": "no_team_type" } })
    );
}
