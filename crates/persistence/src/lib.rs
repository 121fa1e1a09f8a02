// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Courtbook venue reservation system.
//!
//! Users, venues, reservation profiles and reservations live in `SQLite`,
//! accessed through Diesel. Migrations are embedded and applied when a
//! connection is opened.
//!
//! `Persistence` implements `ReservationStore`, so the regeneration
//! controller runs directly against it. Reservation batches are written in
//! a single transaction, and a unique index on (venue, date, slot) backs
//! the allocator's no-double-booking guarantee.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller an isolated shared
//! in-memory database, so tests never touch the filesystem.

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
#![allow(clippy::multiple_crate_versions)]

use courtbook::ReservationStore;
use courtbook_domain::{
    AccountStatus, BookingWeek, Reservation, ReservationProfile, TeamOwner, TimeSlot, Venue,
    validate_profile, validate_venue,
};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use tracing::warn;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// `SQLite` persistence adapter.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:courtbook_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Administrative Writes
    // ========================================================================

    /// Creates a user and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_user(
        &mut self,
        display_name: &str,
        team_type: Option<&str>,
        account_status: &AccountStatus,
    ) -> Result<i64, PersistenceError> {
        mutations::create_user(&mut self.conn, display_name, team_type, account_status)
    }

    /// Creates a venue and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the venue fails validation or the insert fails.
    pub fn create_venue(&mut self, venue: &Venue) -> Result<i64, PersistenceError> {
        validate_venue(venue)?;
        mutations::create_venue(&mut self.conn, venue)
    }

    /// Deletes a venue together with its reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the venue does not exist or the delete fails.
    pub fn delete_venue(&mut self, venue_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_venue(&mut self.conn, venue_id)
    }

    /// Creates a reservation profile and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile fails validation or the insert fails.
    pub fn create_profile(
        &mut self,
        profile: &ReservationProfile,
    ) -> Result<i64, PersistenceError> {
        validate_profile(profile)?;
        mutations::create_profile(&mut self.conn, profile)
    }

    /// Blocks a slot for maintenance.
    ///
    /// # Errors
    ///
    /// Returns an error if the venue does not exist or the slot is taken.
    pub fn create_maintenance_block(
        &mut self,
        venue_id: i64,
        owner_user_id: i64,
        date: Date,
        slot: TimeSlot,
    ) -> Result<Reservation, PersistenceError> {
        mutations::insert_reservation(
            &mut self.conn,
            &Reservation::maintenance(venue_id, owner_user_id, date, slot),
        )
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: i64) -> Result<Option<TeamOwner>, PersistenceError> {
        queries::get_user(&mut self.conn, user_id)
    }

    /// Retrieves a venue by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_venue(&mut self, venue_id: i64) -> Result<Option<Venue>, PersistenceError> {
        queries::get_venue(&mut self.conn, venue_id)
    }

    /// Retrieves a reservation by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(
        &mut self,
        reservation_id: i64,
    ) -> Result<Option<Reservation>, PersistenceError> {
        queries::get_reservation(&mut self.conn, reservation_id)
    }
}

impl ReservationStore for Persistence {
    type Error = PersistenceError;

    fn list_candidate_profiles(&mut self) -> Result<Vec<ReservationProfile>, Self::Error> {
        queries::list_profiles(&mut self.conn)
    }

    fn list_team_owners(&mut self) -> Result<Vec<TeamOwner>, Self::Error> {
        queries::list_users(&mut self.conn)
    }

    fn list_venues(&mut self) -> Result<Vec<Venue>, Self::Error> {
        queries::list_venues(&mut self.conn)
    }

    fn list_reservations_in_week(
        &mut self,
        week: &BookingWeek,
    ) -> Result<Vec<Reservation>, Self::Error> {
        queries::list_reservations_between(&mut self.conn, week.start(), week.end())
    }

    fn delete_reservations(&mut self, reservations: &[Reservation]) -> Result<usize, Self::Error> {
        let ids: Vec<i64> = reservations
            .iter()
            .filter_map(|reservation| {
                if reservation.reservation_id.is_none() {
                    warn!(?reservation, "Ignoring unpersisted reservation in delete");
                }
                reservation.reservation_id
            })
            .collect();
        mutations::delete_reservations(&mut self.conn, &ids)
    }

    fn persist_reservations(
        &mut self,
        reservations: &[Reservation],
    ) -> Result<Vec<Reservation>, Self::Error> {
        mutations::insert_reservations(&mut self.conn, reservations)
    }
}
