// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrative writes for the records the allocator reads.

use courtbook_domain::{AccountStatus, ReservationProfile, Venue};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::encode_money;
use crate::diesel_schema::{profile_venues, reservation_profiles, users, venues};
use crate::error::PersistenceError;

/// Creates a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `display_name` - The user or team name
/// * `team_type` - The team type; `None` for non-team users
/// * `account_status` - The account status
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    display_name: &str,
    team_type: Option<&str>,
    account_status: &AccountStatus,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values((
            users::display_name.eq(display_name),
            users::team_type.eq(team_type),
            users::account_status.eq(account_status.as_str()),
        ))
        .execute(conn)?;

    let user_id: i64 = get_last_insert_rowid(conn)?;
    info!(user_id, display_name, "Created user");
    Ok(user_id)
}

/// Creates a venue. The `venue_id` of `venue` is ignored.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_venue(conn: &mut SqliteConnection, venue: &Venue) -> Result<i64, PersistenceError> {
    diesel::insert_into(venues::table)
        .values((
            venues::name.eq(&venue.name),
            venues::city.eq(&venue.city),
            venues::tariff.eq(encode_money("tariff", venue.tariff)?),
            venues::status.eq(venue.status.as_str()),
        ))
        .execute(conn)?;

    let venue_id: i64 = get_last_insert_rowid(conn)?;
    info!(venue_id, name = %venue.name, city = %venue.city, "Created venue");
    Ok(venue_id)
}

/// Deletes a venue. Its reservations cascade; profiles referencing it keep
/// the dangling reference.
///
/// # Errors
///
/// Returns an error if the venue does not exist or the delete fails.
pub fn delete_venue(conn: &mut SqliteConnection, venue_id: i64) -> Result<(), PersistenceError> {
    let removed: usize =
        diesel::delete(venues::table.filter(venues::venue_id.eq(venue_id))).execute(conn)?;

    if removed == 0 {
        return Err(PersistenceError::NotFound(format!("Venue {venue_id}")));
    }

    info!(venue_id, "Deleted venue");
    Ok(())
}

/// Creates a reservation profile and its candidate venue list in one
/// transaction. The `profile_id` of `profile` is ignored.
///
/// # Errors
///
/// Returns an error if any insert fails; nothing is kept in that case.
pub fn create_profile(
    conn: &mut SqliteConnection,
    profile: &ReservationProfile,
) -> Result<i64, PersistenceError> {
    let weekly_budget: i64 = encode_money("weekly_budget", profile.weekly_budget)?;

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        diesel::insert_into(reservation_profiles::table)
            .values((
                reservation_profiles::owner_user_id.eq(profile.owner_user_id),
                reservation_profiles::age_category.eq(profile.age_category.as_str()),
                reservation_profiles::weekly_budget.eq(weekly_budget),
                reservation_profiles::preferred_interval
                    .eq(Some(profile.preferred_interval.as_str())),
                reservation_profiles::city.eq(&profile.city),
            ))
            .execute(conn)?;

        let profile_id: i64 = get_last_insert_rowid(conn)?;

        for (position, venue_id) in (0_i32..).zip(&profile.venue_ids) {
            diesel::insert_into(profile_venues::table)
                .values((
                    profile_venues::profile_id.eq(profile_id),
                    profile_venues::venue_id.eq(*venue_id),
                    profile_venues::position.eq(position),
                ))
                .execute(conn)?;
        }

        info!(
            profile_id,
            owner_user_id = profile.owner_user_id,
            venues = profile.venue_ids.len(),
            "Created reservation profile"
        );
        Ok(profile_id)
    })
}
