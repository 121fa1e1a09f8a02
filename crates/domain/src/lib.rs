// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod eligibility;
mod error;
mod policy;
mod priority;
mod slots;
mod types;
mod validation;
mod week;

#[cfg(test)]
mod tests;

pub use eligibility::{EligibilityOutcome, Ineligibility, check_eligibility, filter_eligible};
pub use policy::{AllocationPolicy, TimeWindow};
pub use priority::{RankedProfile, compare_priority, priority_tier, rank_profiles};
pub use slots::{SLOT_COUNT, TimeSlot};
pub use week::{BookingWeek, DAYS_PER_WEEK};

// Re-export public types
pub use error::DomainError;
pub use types::{
    AccountStatus, AgeCategory, Money, PreferredInterval, Reservation, ReservationKind,
    ReservationProfile, ReservationStatus, TeamOwner, Venue, VenueStatus,
};
pub use validation::{validate_profile, validate_venue};
