// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtbook_domain::{Reservation, ReservationKind, ReservationStatus, TimeSlot};
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::str::FromStr;
use time::Date;
use tracing::debug;

use crate::data_models::{decode_date, decode_money, encode_date};
use crate::diesel_schema::reservations;
use crate::error::PersistenceError;

const TABLE: &str = "reservations";

/// Diesel Queryable struct for reservation rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = reservations)]
struct ReservationRow {
    reservation_id: i64,
    venue_id: i64,
    owner_user_id: i64,
    reservation_date: String,
    slot_label: String,
    price: i64,
    kind: String,
    status: String,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = PersistenceError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let id: i64 = row.reservation_id;
        let corrupt = |message: String| PersistenceError::CorruptRecord {
            table: TABLE,
            id,
            message,
        };

        Ok(Self {
            reservation_id: Some(id),
            venue_id: row.venue_id,
            owner_user_id: row.owner_user_id,
            date: decode_date(TABLE, id, &row.reservation_date)?,
            slot: TimeSlot::from_label(&row.slot_label).map_err(|e| corrupt(e.to_string()))?,
            price: decode_money(TABLE, id, "price", row.price)?,
            kind: ReservationKind::from_str(&row.kind).map_err(|e| corrupt(e.to_string()))?,
            status: ReservationStatus::from_str(&row.status)
                .map_err(|e| corrupt(e.to_string()))?,
        })
    }
}

/// Lists every reservation dated in `[start, end]`, of any kind or status.
///
/// Rows are ordered by date, slot and venue.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_reservations_between(
    conn: &mut SqliteConnection,
    start: Date,
    end: Date,
) -> Result<Vec<Reservation>, PersistenceError> {
    let rows: Vec<ReservationRow> = reservations::table
        .filter(reservations::reservation_date.ge(encode_date(start)?))
        .filter(reservations::reservation_date.le(encode_date(end)?))
        .order((
            reservations::reservation_date.asc(),
            reservations::slot_label.asc(),
            reservations::venue_id.asc(),
        ))
        .select(ReservationRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), %start, %end, "Loaded reservations");
    rows.into_iter().map(Reservation::try_from).collect()
}

/// Retrieves a reservation by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
/// Returns `Ok(None)` if the reservation is not found.
pub fn get_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<Option<Reservation>, PersistenceError> {
    let row: Option<ReservationRow> = reservations::table
        .filter(reservations::reservation_id.eq(reservation_id))
        .select(ReservationRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Reservation::try_from).transpose()
}
