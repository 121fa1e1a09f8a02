// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Greedy weekly slot assignment.
//!
//! Profiles are served strictly in ranked order. Each profile walks the
//! week's dates in random order and takes at most one slot per date until
//! its quota is met, choosing a random candidate venue that it can still
//! afford and a random free slot inside its preferred window and age
//! partition. The result is not globally optimal.
//!
//! ## Invariants
//!
//! - No (venue, date, slot) triple is booked twice
//! - A profile's spend never exceeds its weekly budget
//! - A profile receives at most one reservation per date
//! - A profile receives at most its category quota

use crate::calendar::AvailabilityCalendar;
use courtbook_domain::{
    AllocationPolicy, Ineligibility, Money, RankedProfile, Reservation, ReservationProfile,
    TimeSlot, Venue,
};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::Date;
use tracing::{debug, info, warn};

/// Why a profile received no reservations without being allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The profile failed the eligibility filter.
    Ineligible {
        /// The eligibility failure.
        reason: Ineligibility,
    },
    /// The profile references a venue that no longer exists.
    VenueMissing {
        /// The dangling venue reference.
        venue_id: i64,
    },
    /// None of the profile's venues is in the profile's city.
    NoVenueInCity,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ineligible { reason } => write!(f, "ineligible: {reason}"),
            Self::VenueMissing { venue_id } => write!(f, "venue {venue_id} does not exist"),
            Self::NoVenueInCity => write!(f, "no candidate venue in the profile's city"),
        }
    }
}

/// A profile that took no part in allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedProfile {
    /// The profile's canonical ID.
    pub profile_id: i64,
    /// The owning user.
    pub owner_user_id: i64,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// What one ranked profile received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// The profile's canonical ID.
    pub profile_id: i64,
    /// The profile's 1-based priority position.
    pub position: usize,
    /// The category quota.
    pub quota: u8,
    /// Reservations granted.
    pub granted: u8,
    /// Total tariff of the granted reservations.
    pub spent: Money,
}

/// Output of one allocation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    /// New, unpersisted reservations in the order they were granted.
    pub reservations: Vec<Reservation>,
    /// One entry per allocated profile, in priority order.
    pub summaries: Vec<ProfileSummary>,
    /// Profiles skipped because of data or configuration problems.
    pub skipped: Vec<SkippedProfile>,
}

/// Assigns slots to ranked profiles, consuming availability from `calendar`.
///
/// # Arguments
///
/// * `policy` - Quotas, windows and age partition
/// * `ranked` - Eligible profiles in priority order
/// * `venues` - Every known venue
/// * `calendar` - Availability of the target week; mutated in place
/// * `rng` - The run's random source
pub fn allocate_week<R: Rng + ?Sized>(
    policy: &AllocationPolicy,
    ranked: &[RankedProfile],
    venues: &[Venue],
    calendar: &mut AvailabilityCalendar,
    rng: &mut R,
) -> Allocation {
    let venues_by_id: HashMap<i64, &Venue> =
        venues.iter().map(|venue| (venue.venue_id, venue)).collect();

    let mut allocation: Allocation = Allocation::default();

    for entry in ranked {
        let profile: &ReservationProfile = &entry.profile;

        let candidates: Vec<&Venue> = match candidate_venues(profile, &venues_by_id) {
            Ok(candidates) => candidates,
            Err(reason) => {
                warn!(
                    profile_id = profile.profile_id,
                    reason = %reason,
                    "Skipping profile"
                );
                allocation.skipped.push(SkippedProfile {
                    profile_id: profile.profile_id,
                    owner_user_id: profile.owner_user_id,
                    reason,
                });
                continue;
            }
        };

        let summary: ProfileSummary = allocate_profile(
            policy,
            entry,
            candidates,
            calendar,
            rng,
            &mut allocation.reservations,
        );
        allocation.summaries.push(summary);
    }

    info!(
        profiles = allocation.summaries.len(),
        skipped = allocation.skipped.len(),
        reservations = allocation.reservations.len(),
        "Weekly allocation complete"
    );

    allocation
}

/// Resolves a profile's venues, keeping those in the profile's city.
fn candidate_venues<'a>(
    profile: &ReservationProfile,
    venues_by_id: &HashMap<i64, &'a Venue>,
) -> Result<Vec<&'a Venue>, SkipReason> {
    let mut candidates: Vec<&Venue> = Vec::with_capacity(profile.venue_ids.len());
    for &venue_id in &profile.venue_ids {
        let venue: &Venue = venues_by_id
            .get(&venue_id)
            .copied()
            .ok_or(SkipReason::VenueMissing { venue_id })?;
        if venue.city == profile.city {
            candidates.push(venue);
        }
    }

    if candidates.is_empty() {
        return Err(SkipReason::NoVenueInCity);
    }
    Ok(candidates)
}

fn allocate_profile<R: Rng + ?Sized>(
    policy: &AllocationPolicy,
    entry: &RankedProfile,
    mut candidates: Vec<&Venue>,
    calendar: &mut AvailabilityCalendar,
    rng: &mut R,
    out: &mut Vec<Reservation>,
) -> ProfileSummary {
    let profile: &ReservationProfile = &entry.profile;
    let quota: u8 = policy.quota(&profile.age_category);

    let mut remaining: Money = profile.weekly_budget;
    let mut spent: Money = Money::ZERO;
    let mut granted: u8 = 0;

    let mut dates: Vec<Date> = calendar.week().dates().to_vec();
    dates.shuffle(rng);

    for date in dates {
        if granted >= quota {
            break;
        }

        candidates.shuffle(rng);
        for venue in &candidates {
            let Some(after_booking) = remaining.checked_sub(venue.tariff) else {
                continue;
            };
            if !calendar.has_day(venue.venue_id, date) {
                continue;
            }

            let mut open: Vec<TimeSlot> = calendar
                .available_slots(venue.venue_id, date)
                .into_iter()
                .filter(|slot| {
                    policy.admits(&profile.age_category, profile.preferred_interval, *slot)
                })
                .collect();
            open.shuffle(rng);
            let Some(&slot) = open.first() else {
                continue;
            };

            calendar.mark_unavailable(venue.venue_id, date, slot);
            out.push(Reservation::booking(
                venue.venue_id,
                profile.owner_user_id,
                date,
                slot,
                venue.tariff,
            ));
            remaining = after_booking;
            spent += venue.tariff;
            granted += 1;

            debug!(
                profile_id = profile.profile_id,
                venue_id = venue.venue_id,
                date = %date,
                slot = %slot,
                "Granted reservation"
            );

            // One reservation per date.
            break;
        }
    }

    ProfileSummary {
        profile_id: profile.profile_id,
        position: entry.position,
        quota,
        granted,
        spent,
    }
}
