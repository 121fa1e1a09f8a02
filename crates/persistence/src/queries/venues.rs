// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtbook_domain::{Money, Venue, VenueStatus};
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::str::FromStr;
use tracing::debug;

use crate::data_models::decode_money;
use crate::diesel_schema::venues;
use crate::error::PersistenceError;

/// Diesel Queryable struct for venue rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = venues)]
struct VenueRow {
    venue_id: i64,
    name: String,
    city: String,
    tariff: i64,
    status: String,
}

impl TryFrom<VenueRow> for Venue {
    type Error = PersistenceError;

    fn try_from(row: VenueRow) -> Result<Self, Self::Error> {
        let tariff: Money = decode_money("venues", row.venue_id, "tariff", row.tariff)?;
        let status: VenueStatus =
            VenueStatus::from_str(&row.status).map_err(|e| PersistenceError::CorruptRecord {
                table: "venues",
                id: row.venue_id,
                message: e.to_string(),
            })?;

        Ok(Self {
            venue_id: row.venue_id,
            name: row.name,
            city: row.city,
            tariff,
            status,
        })
    }
}

/// Lists every venue, ordered by ID.
///
/// Inactive venues are included.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_venues(conn: &mut SqliteConnection) -> Result<Vec<Venue>, PersistenceError> {
    let rows: Vec<VenueRow> = venues::table
        .order(venues::venue_id.asc())
        .select(VenueRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded venues");
    rows.into_iter().map(Venue::try_from).collect()
}

/// Retrieves a venue by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
/// Returns `Ok(None)` if the venue is not found.
pub fn get_venue(
    conn: &mut SqliteConnection,
    venue_id: i64,
) -> Result<Option<Venue>, PersistenceError> {
    let row: Option<VenueRow> = venues::table
        .filter(venues::venue_id.eq(venue_id))
        .select(VenueRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Venue::try_from).transpose()
}
