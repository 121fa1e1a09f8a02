// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Priority order in which eligible profiles claim slots.
//!
//! ## Ordering Rules
//!
//! Profiles are ordered by:
//! 1. Age-category tier: `senior`, then `17-18`, `15-16`, `0-14`,
//!    then any unrecognized category
//! 2. Weekly budget (highest first)
//! 3. Random coin drawn from the run's random source
//!
//! ## Invariants
//!
//! - The order is total: rule 3 always separates remaining ties
//! - With a seeded random source the order is reproducible
//!
//! ## Usage
//!
//! This logic is used by the weekly allocator, which walks the ranked list
//! front to back.

use crate::types::{AgeCategory, Money, ReservationProfile};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};

/// A profile with its position in the run's priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedProfile {
    /// The 1-based position (1 = first to claim slots).
    pub position: usize,
    /// The ranked profile.
    pub profile: ReservationProfile,
}

/// Returns the tier of an age category; lower tiers claim first.
#[must_use]
pub const fn priority_tier(category: &AgeCategory) -> u8 {
    match category {
        AgeCategory::Senior => 0,
        AgeCategory::Under18 => 1,
        AgeCategory::Under16 => 2,
        AgeCategory::Under14 => 3,
        AgeCategory::Unrecognized(_) => 4,
    }
}

/// Compares two profiles by the deterministic priority rules.
///
/// Returns:
/// - `Ordering::Less` if `a` claims before `b`
/// - `Ordering::Greater` if `b` claims before `a`
/// - `Ordering::Equal` if only the random coin can separate them
#[must_use]
pub fn compare_priority(a: &ReservationProfile, b: &ReservationProfile) -> Ordering {
    priority_key(a).cmp(&priority_key(b))
}

const fn priority_key(profile: &ReservationProfile) -> (u8, Reverse<Money>) {
    (
        priority_tier(&profile.age_category),
        Reverse(profile.weekly_budget),
    )
}

/// Ranks eligible profiles.
///
/// Profiles are shuffled with `rng` before a stable sort on the
/// deterministic rules, so ties fall in random order.
///
/// # Arguments
///
/// * `profiles` - Eligible profiles, in any order
/// * `rng` - The run's random source
///
/// # Returns
///
/// A vector of `RankedProfile` in order (position 1 is first).
pub fn rank_profiles<R: Rng + ?Sized>(
    mut profiles: Vec<ReservationProfile>,
    rng: &mut R,
) -> Vec<RankedProfile> {
    profiles.shuffle(rng);
    profiles.sort_by(compare_priority);

    profiles
        .into_iter()
        .enumerate()
        .map(|(index, profile)| RankedProfile {
            position: index + 1,
            profile,
        })
        .collect()
}
