// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    MemoryStore, StoreFailure, TEST_TODAY, create_test_profile, create_test_venue,
    create_test_week, slot,
};
use crate::{RegenerationError, RegenerationOutcome, SkipReason, regenerate_week};
use courtbook_domain::{
    AccountStatus, AllocationPolicy, BookingWeek, Ineligibility, Money, PreferredInterval,
    Reservation,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::macros::date;

fn create_populated_store() -> MemoryStore {
    let mut store: MemoryStore = MemoryStore::default();
    store.venues = vec![
        create_test_venue(1, "Cluj", 100),
        create_test_venue(2, "Cluj", 80),
    ];
    store.add_team(create_test_profile(
        1,
        "senior",
        600,
        PreferredInterval::FullDay,
        vec![1, 2],
    ));
    store.add_team(create_test_profile(
        2,
        "15-16",
        400,
        PreferredInterval::Evening,
        vec![1, 2],
    ));
    store
}

fn regenerate(
    store: &mut MemoryStore,
    seed: u64,
) -> Result<RegenerationOutcome, RegenerationError<StoreFailure>> {
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    regenerate_week(store, TEST_TODAY, &AllocationPolicy::default(), &mut rng)
}

#[test]
fn test_run_targets_following_week_and_persists() {
    let mut store: MemoryStore = create_populated_store();

    let outcome: RegenerationOutcome = regenerate(&mut store, 1).unwrap();

    assert_eq!(outcome.week, create_test_week());
    assert_eq!(outcome.deleted, 0);
    assert_eq!(outcome.count(), 6 + 4);
    assert!(outcome.skipped.is_empty());
    assert!(
        outcome
            .reservations
            .iter()
            .all(|reservation| reservation.reservation_id.is_some())
    );
    assert_eq!(store.bookings_in(&outcome.week), outcome.reservations);
}

#[test]
fn test_rerun_replaces_previous_bookings() {
    let mut store: MemoryStore = create_populated_store();

    let first: RegenerationOutcome = regenerate(&mut store, 1).unwrap();
    let second: RegenerationOutcome = regenerate(&mut store, 2).unwrap();

    assert_eq!(second.deleted, first.count());
    assert_eq!(second.count(), first.count());
    assert_eq!(store.bookings_in(&second.week).len(), second.count());
}

#[test]
fn test_maintenance_and_other_weeks_are_untouched() {
    let mut store: MemoryStore = create_populated_store();
    let blocks: Vec<Reservation> = create_test_week()
        .dates()
        .iter()
        .map(|date| store.insert(Reservation::maintenance(1, 99, *date, slot("08:30"))))
        .collect();
    let last_week: Reservation = store.insert(Reservation::booking(
        1,
        1,
        date!(2026 - 10 - 14),
        slot("10:00"),
        Money::new(100),
    ));
    let later_week: Reservation = store.insert(Reservation::booking(
        2,
        2,
        date!(2026 - 10 - 27),
        slot("19:00"),
        Money::new(80),
    ));

    let outcome: RegenerationOutcome = regenerate(&mut store, 5).unwrap();

    for block in &blocks {
        assert!(store.reservations.contains(block));
    }
    assert!(store.reservations.contains(&last_week));
    assert!(store.reservations.contains(&later_week));
    assert_eq!(outcome.deleted, 0);
    assert!(
        outcome
            .reservations
            .iter()
            .all(|reservation| !(reservation.venue_id == 1 && reservation.slot == slot("08:30")))
    );
}

#[test]
fn test_ineligible_profiles_are_reported_not_fatal() {
    let mut store: MemoryStore = create_populated_store();
    store.profiles.push(create_test_profile(
        7,
        "senior",
        900,
        PreferredInterval::FullDay,
        vec![1],
    ));
    store.add_team(create_test_profile(
        8,
        "senior",
        900,
        PreferredInterval::FullDay,
        vec![1],
    ));
    store.owners.last_mut().unwrap().account_status = AccountStatus::Suspended;

    let outcome: RegenerationOutcome = regenerate(&mut store, 3).unwrap();

    assert_eq!(outcome.skipped.len(), 2);
    assert_eq!(
        outcome.skipped[0].reason,
        SkipReason::Ineligible {
            reason: Ineligibility::OwnerMissing { owner_user_id: 7 }
        }
    );
    assert_eq!(
        outcome.skipped[1].reason,
        SkipReason::Ineligible {
            reason: Ineligibility::AccountNotActive {
                status: AccountStatus::Suspended
            }
        }
    );
    assert!(
        outcome
            .reservations
            .iter()
            .all(|reservation| reservation.owner_user_id != 7 && reservation.owner_user_id != 8)
    );
}

#[test]
fn test_delete_failure_aborts_before_allocation() {
    let mut store: MemoryStore = create_populated_store();
    regenerate(&mut store, 1).unwrap();
    let before: Vec<Reservation> = store.reservations.clone();
    let persist_calls: usize = store.persist_calls;
    store.fail_delete = true;

    let result: Result<RegenerationOutcome, RegenerationError<StoreFailure>> =
        regenerate(&mut store, 2);

    assert!(matches!(result, Err(RegenerationError::DeleteFailed(_))));
    assert_eq!(store.reservations, before);
    assert_eq!(store.persist_calls, persist_calls);
}

#[test]
fn test_persist_failure_leaves_week_cleared() {
    let mut store: MemoryStore = create_populated_store();
    let week: BookingWeek = create_test_week();
    let block: Reservation =
        store.insert(Reservation::maintenance(2, 99, week.start(), slot("13:00")));
    regenerate(&mut store, 1).unwrap();
    store.fail_persist = true;

    let result: Result<RegenerationOutcome, RegenerationError<StoreFailure>> =
        regenerate(&mut store, 2);

    assert!(matches!(result, Err(RegenerationError::PersistFailed(_))));
    assert!(store.bookings_in(&week).is_empty());
    assert_eq!(store.reservations, vec![block]);
}

#[test]
fn test_load_failure_is_reported() {
    let mut store: MemoryStore = create_populated_store();
    store.fail_load = true;

    let result: Result<RegenerationOutcome, RegenerationError<StoreFailure>> =
        regenerate(&mut store, 1);

    match result {
        Err(RegenerationError::LoadFailed { what, source }) => {
            assert_eq!(what, "profiles");
            assert_eq!(source, StoreFailure("load"));
        }
        other => panic!("expected load failure, got {other:?}"),
    }
}

#[test]
fn test_run_without_profiles_skips_persist() {
    let mut store: MemoryStore = MemoryStore::default();
    store.venues = vec![create_test_venue(1, "Cluj", 100)];
    store.fail_persist = true;

    let outcome: RegenerationOutcome = regenerate(&mut store, 1).unwrap();

    assert_eq!(outcome.count(), 0);
    assert_eq!(store.persist_calls, 0);
}

#[test]
fn test_error_messages_name_the_failed_step() {
    let error: RegenerationError<StoreFailure> =
        RegenerationError::PersistFailed(StoreFailure("persist"));

    assert_eq!(
        error.to_string(),
        "Failed to persist generated reservations: injected failure: persist"
    );
}
