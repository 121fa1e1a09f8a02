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

mod allocator;
mod calendar;
mod error;
mod regenerate;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use allocator::{Allocation, ProfileSummary, SkipReason, SkippedProfile, allocate_week};
pub use calendar::AvailabilityCalendar;
pub use error::RegenerationError;
pub use regenerate::{RegenerationOutcome, regenerate_week};
pub use store::ReservationStore;
