// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly regeneration controller.
//!
//! One run targets the Monday-to-Sunday week following `today`:
//!
//! 1. Delete every team booking dated in the week. Maintenance blocks and
//!    records outside the week are kept.
//! 2. Rebuild the availability calendar from what remains.
//! 3. Filter, rank and allocate the candidate profiles.
//! 4. Persist the new batch in one transaction.
//!
//! A failure in step 1 aborts before anything is allocated. A failure in
//! step 4 leaves the week without team bookings; re-running repairs it.
//!
//! Runs must not overlap. Callers serialize them.

use crate::allocator::{Allocation, ProfileSummary, SkipReason, SkippedProfile, allocate_week};
use crate::calendar::AvailabilityCalendar;
use crate::error::RegenerationError;
use crate::store::ReservationStore;
use courtbook_domain::{
    AllocationPolicy, BookingWeek, EligibilityOutcome, RankedProfile, Reservation,
    ReservationProfile, TeamOwner, Venue, filter_eligible, rank_profiles,
};
use rand::Rng;
use time::Date;
use tracing::{info, warn};

/// Result of a successful regeneration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerationOutcome {
    /// The week that was regenerated.
    pub week: BookingWeek,
    /// Number of previous team bookings removed.
    pub deleted: usize,
    /// The persisted reservations, with IDs.
    pub reservations: Vec<Reservation>,
    /// What each allocated profile received, in priority order.
    pub summaries: Vec<ProfileSummary>,
    /// Profiles that took no part, with the reason.
    pub skipped: Vec<SkippedProfile>,
}

impl RegenerationOutcome {
    /// Number of reservations created by the run.
    #[must_use]
    pub fn count(&self) -> usize {
        self.reservations.len()
    }
}

/// Regenerates team bookings for the week following `today`.
///
/// # Arguments
///
/// * `store` - The backing store
/// * `today` - The run date; the target week starts on the next Monday
/// * `policy` - Quotas, windows and age partition
/// * `rng` - The run's random source
///
/// # Errors
///
/// Returns an error if the week cannot be computed or the store fails.
/// Data problems in individual profiles are reported in the outcome.
pub fn regenerate_week<S, R>(
    store: &mut S,
    today: Date,
    policy: &AllocationPolicy,
    rng: &mut R,
) -> Result<RegenerationOutcome, RegenerationError<S::Error>>
where
    S: ReservationStore + ?Sized,
    R: Rng + ?Sized,
{
    let week: BookingWeek = BookingWeek::following(today)?;
    info!(today = %today, week = %week, "Starting weekly regeneration");

    let deleted: usize = clear_team_bookings(store, &week)?;

    let kept: Vec<Reservation> = store
        .list_reservations_in_week(&week)
        .map_err(|source| RegenerationError::load_failed("reservations", source))?;
    let venues: Vec<Venue> = store
        .list_venues()
        .map_err(|source| RegenerationError::load_failed("venues", source))?;
    let mut calendar: AvailabilityCalendar = AvailabilityCalendar::build(week, &venues, &kept);

    let profiles: Vec<ReservationProfile> = store
        .list_candidate_profiles()
        .map_err(|source| RegenerationError::load_failed("profiles", source))?;
    let owners: Vec<TeamOwner> = store
        .list_team_owners()
        .map_err(|source| RegenerationError::load_failed("users", source))?;

    let eligibility: EligibilityOutcome = filter_eligible(profiles, &owners);
    let mut skipped: Vec<SkippedProfile> = eligibility
        .rejected
        .into_iter()
        .map(|(profile, reason)| {
            warn!(
                profile_id = profile.profile_id,
                reason = %reason,
                "Profile is not eligible"
            );
            SkippedProfile {
                profile_id: profile.profile_id,
                owner_user_id: profile.owner_user_id,
                reason: SkipReason::Ineligible { reason },
            }
        })
        .collect();

    let ranked: Vec<RankedProfile> = rank_profiles(eligibility.eligible, rng);
    let allocation: Allocation = allocate_week(policy, &ranked, &venues, &mut calendar, rng);
    skipped.extend(allocation.skipped);

    let reservations: Vec<Reservation> = if allocation.reservations.is_empty() {
        Vec::new()
    } else {
        store
            .persist_reservations(&allocation.reservations)
            .map_err(RegenerationError::PersistFailed)?
    };

    info!(
        week = %week,
        deleted,
        created = reservations.len(),
        skipped = skipped.len(),
        "Weekly regeneration complete"
    );

    Ok(RegenerationOutcome {
        week,
        deleted,
        reservations,
        summaries: allocation.summaries,
        skipped,
    })
}

/// Deletes the team bookings dated inside `week`.
fn clear_team_bookings<S>(
    store: &mut S,
    week: &BookingWeek,
) -> Result<usize, RegenerationError<S::Error>>
where
    S: ReservationStore + ?Sized,
{
    let stale: Vec<Reservation> = store
        .list_reservations_in_week(week)
        .map_err(|source| RegenerationError::load_failed("reservations", source))?
        .into_iter()
        .filter(|reservation| reservation.is_booking() && week.contains(reservation.date))
        .collect();

    if stale.is_empty() {
        return Ok(0);
    }

    store
        .delete_reservations(&stale)
        .map_err(RegenerationError::DeleteFailed)
}
