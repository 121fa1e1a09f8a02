// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The data boundary the regeneration controller runs against.

use courtbook_domain::{BookingWeek, Reservation, ReservationProfile, TeamOwner, Venue};

/// Reads and writes everything a regeneration run touches.
///
/// Implementations decide how records are stored. The controller only
/// requires that `persist_reservations` is all-or-nothing.
pub trait ReservationStore {
    /// The backing store's failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lists every reservation profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profiles cannot be read.
    fn list_candidate_profiles(&mut self) -> Result<Vec<ReservationProfile>, Self::Error>;

    /// Lists every user that may own profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the users cannot be read.
    fn list_team_owners(&mut self) -> Result<Vec<TeamOwner>, Self::Error>;

    /// Lists every venue.
    ///
    /// # Errors
    ///
    /// Returns an error if the venues cannot be read.
    fn list_venues(&mut self) -> Result<Vec<Venue>, Self::Error>;

    /// Lists every reservation, of any kind or status, dated inside `week`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservations cannot be read.
    fn list_reservations_in_week(
        &mut self,
        week: &BookingWeek,
    ) -> Result<Vec<Reservation>, Self::Error>;

    /// Deletes the given persisted reservations.
    ///
    /// # Returns
    ///
    /// The number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    fn delete_reservations(&mut self, reservations: &[Reservation]) -> Result<usize, Self::Error>;

    /// Persists a batch of new reservations atomically.
    ///
    /// # Returns
    ///
    /// The reservations with their assigned IDs, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing from the batch is kept.
    fn persist_reservations(
        &mut self,
        reservations: &[Reservation],
    ) -> Result<Vec<Reservation>, Self::Error>;
}
