// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtbook_domain::Reservation;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{encode_date, encode_money};
use crate::diesel_schema::reservations;
use crate::error::PersistenceError;

/// Inserts one reservation.
///
/// # Returns
///
/// The reservation carrying its new ID.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the
/// (venue, date, slot) triple is already taken.
pub fn insert_reservation(
    conn: &mut SqliteConnection,
    reservation: &Reservation,
) -> Result<Reservation, PersistenceError> {
    diesel::insert_into(reservations::table)
        .values((
            reservations::venue_id.eq(reservation.venue_id),
            reservations::owner_user_id.eq(reservation.owner_user_id),
            reservations::reservation_date.eq(encode_date(reservation.date)?),
            reservations::slot_label.eq(reservation.slot.label()),
            reservations::price.eq(encode_money("price", reservation.price)?),
            reservations::kind.eq(reservation.kind.as_str()),
            reservations::status.eq(reservation.status.as_str()),
        ))
        .execute(conn)?;

    let reservation_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        reservation_id,
        venue_id = reservation.venue_id,
        date = %reservation.date,
        slot = %reservation.slot,
        "Inserted reservation"
    );

    Ok(reservation.clone().with_id(reservation_id))
}

/// Inserts a batch of reservations in one transaction.
///
/// # Errors
///
/// Returns an error if any insert fails. The whole batch is rolled back.
pub fn insert_reservations(
    conn: &mut SqliteConnection,
    batch: &[Reservation],
) -> Result<Vec<Reservation>, PersistenceError> {
    let stored: Vec<Reservation> = conn.transaction::<_, PersistenceError, _>(|conn| {
        batch
            .iter()
            .map(|reservation| insert_reservation(conn, reservation))
            .collect()
    })?;

    info!(count = stored.len(), "Persisted reservation batch");
    Ok(stored)
}

/// Deletes reservations by ID.
///
/// # Returns
///
/// The number of rows removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_reservations(
    conn: &mut SqliteConnection,
    reservation_ids: &[i64],
) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(
        reservations::table.filter(reservations::reservation_id.eq_any(reservation_ids)),
    )
    .execute(conn)?;

    info!(removed, "Deleted reservations");
    Ok(removed)
}
