// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtbook_domain::{AccountStatus, TeamOwner};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    display_name: String,
    team_type: Option<String>,
    account_status: String,
}

impl From<UserRow> for TeamOwner {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            display_name: row.display_name,
            team_type: row.team_type,
            account_status: AccountStatus::from(row.account_status),
        }
    }
}

/// Lists every user, ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<TeamOwner>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded users");
    Ok(rows.into_iter().map(TeamOwner::from).collect())
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<TeamOwner>, PersistenceError> {
    let row: Option<UserRow> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(TeamOwner::from))
}
