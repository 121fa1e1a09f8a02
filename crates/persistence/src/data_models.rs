// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column encodings shared by queries and mutations.
//!
//! Dates are stored as `YYYY-MM-DD` text so range filters compare
//! lexically. Money is stored as non-negative minor units in `BIGINT`.

use courtbook_domain::Money;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Encodes a date for a `TEXT` date column.
pub fn encode_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::QueryFailed(format!("Failed to format date {date}: {e}")))
}

/// Decodes a `TEXT` date column.
pub fn decode_date(table: &'static str, id: i64, value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| PersistenceError::CorruptRecord {
        table,
        id,
        message: format!("invalid date '{value}': {e}"),
    })
}

/// Encodes an amount for a `BIGINT` money column.
pub fn encode_money(field: &'static str, amount: Money) -> Result<i64, PersistenceError> {
    i64::try_from(amount.minor_units()).map_err(|_| PersistenceError::ValueOutOfRange {
        field,
        value: amount.minor_units(),
    })
}

/// Decodes a `BIGINT` money column.
pub fn decode_money(
    table: &'static str,
    id: i64,
    field: &'static str,
    value: i64,
) -> Result<Money, PersistenceError> {
    Money::from_signed(field, value).map_err(|e| PersistenceError::CorruptRecord {
        table,
        id,
        message: e.to_string(),
    })
}
