// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtbook_domain::{AgeCategory, Money, PreferredInterval, ReservationProfile};
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::HashMap;
use tracing::debug;

use crate::data_models::decode_money;
use crate::diesel_schema::{profile_venues, reservation_profiles};
use crate::error::PersistenceError;

/// Diesel Queryable struct for profile rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = reservation_profiles)]
struct ProfileRow {
    profile_id: i64,
    owner_user_id: i64,
    age_category: String,
    weekly_budget: i64,
    preferred_interval: Option<String>,
    city: String,
}

/// Lists every reservation profile with its candidate venues.
///
/// Candidate venues keep the order they were stored in. Venue references
/// are returned as stored, even if the venue no longer exists.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_profiles(
    conn: &mut SqliteConnection,
) -> Result<Vec<ReservationProfile>, PersistenceError> {
    let rows: Vec<ProfileRow> = reservation_profiles::table
        .order(reservation_profiles::profile_id.asc())
        .select(ProfileRow::as_select())
        .load(conn)?;

    let links: Vec<(i64, i64)> = profile_venues::table
        .order((profile_venues::profile_id.asc(), profile_venues::position.asc()))
        .select((profile_venues::profile_id, profile_venues::venue_id))
        .load(conn)?;

    let mut venues_by_profile: HashMap<i64, Vec<i64>> = HashMap::new();
    for (profile_id, venue_id) in links {
        venues_by_profile
            .entry(profile_id)
            .or_default()
            .push(venue_id);
    }

    debug!(count = rows.len(), "Loaded reservation profiles");

    rows.into_iter()
        .map(|row| {
            let weekly_budget: Money = decode_money(
                "reservation_profiles",
                row.profile_id,
                "weekly_budget",
                row.weekly_budget,
            )?;
            Ok(ReservationProfile {
                profile_id: row.profile_id,
                owner_user_id: row.owner_user_id,
                age_category: AgeCategory::from(row.age_category),
                weekly_budget,
                preferred_interval: PreferredInterval::from_label(
                    row.preferred_interval.as_deref(),
                ),
                city: row.city,
                venue_ids: venues_by_profile
                    .remove(&row.profile_id)
                    .unwrap_or_default(),
            })
        })
        .collect()
}
