// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A slot label is not one of the catalog entries.
    UnknownSlotLabel(String),
    /// A slot index is outside the catalog.
    SlotIndexOutOfRange {
        /// The invalid index.
        index: usize,
        /// The number of slots in the catalog.
        catalog_len: usize,
    },
    /// A reservation kind string is not recognized.
    InvalidReservationKind(String),
    /// A reservation status string is not recognized.
    InvalidReservationStatus(String),
    /// A monetary amount is negative.
    NegativeAmount {
        /// The field that held the amount.
        field: &'static str,
        /// The rejected amount in minor units.
        amount: i64,
    },
    /// A venue status string is not recognized.
    InvalidVenueStatus(String),
    /// A city name is empty.
    InvalidCity(String),
    /// A venue name is empty.
    InvalidVenueName(String),
    /// A profile lists the same venue more than once.
    DuplicateCandidateVenue {
        /// The repeated venue.
        venue_id: i64,
    },
    /// A booking week must start on a Monday.
    InvalidWeekStart {
        /// The rejected start date.
        start_date: time::Date,
        /// The actual weekday.
        weekday: time::Weekday,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSlotLabel(label) => write!(f, "Unknown slot label: '{label}'"),
            Self::SlotIndexOutOfRange { index, catalog_len } => {
                write!(
                    f,
                    "Slot index {index} is out of range. Must be below {catalog_len}"
                )
            }
            Self::InvalidReservationKind(kind) => write!(f, "Invalid reservation kind: '{kind}'"),
            Self::InvalidReservationStatus(status) => {
                write!(f, "Invalid reservation status: '{status}'")
            }
            Self::NegativeAmount { field, amount } => {
                write!(f, "Amount for '{field}' must not be negative, got {amount}")
            }
            Self::InvalidVenueStatus(status) => write!(f, "Invalid venue status: '{status}'"),
            Self::InvalidCity(msg) => write!(f, "Invalid city: {msg}"),
            Self::InvalidVenueName(msg) => write!(f, "Invalid venue name: {msg}"),
            Self::DuplicateCandidateVenue { venue_id } => {
                write!(f, "Profile lists venue {venue_id} more than once")
            }
            Self::InvalidWeekStart {
                start_date,
                weekday,
            } => {
                write!(
                    f,
                    "Booking week must start on a Monday, but {start_date} is a {weekday}"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
