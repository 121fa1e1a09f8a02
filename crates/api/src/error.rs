// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use courtbook::RegenerationError;
use courtbook_domain::DomainError;
use courtbook_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Another regeneration run holds the run lock.
    RegenerationInProgress,
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::RegenerationInProgress => {
                write!(f, "A regeneration run is already in progress")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::UnknownSlotLabel(label) => ApiError::InvalidInput {
            field: String::from("slot"),
            message: format!("Unknown slot label '{label}'"),
        },
        DomainError::SlotIndexOutOfRange { index, catalog_len } => ApiError::InvalidInput {
            field: String::from("slot"),
            message: format!("Slot index {index} is out of range. Must be below {catalog_len}"),
        },
        DomainError::InvalidReservationKind(kind) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Invalid reservation kind '{kind}'"),
        },
        DomainError::InvalidReservationStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid reservation status '{status}'"),
        },
        DomainError::NegativeAmount { field, amount } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Amount must not be negative, got {amount}"),
        },
        DomainError::InvalidVenueStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid venue status '{status}'"),
        },
        DomainError::InvalidCity(msg) => ApiError::InvalidInput {
            field: String::from("city"),
            message: msg,
        },
        DomainError::InvalidVenueName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::DuplicateCandidateVenue { venue_id } => ApiError::DomainRuleViolation {
            rule: String::from("unique_candidate_venue"),
            message: format!("Profile lists venue {venue_id} more than once"),
        },
        DomainError::InvalidWeekStart {
            start_date,
            weekday,
        } => ApiError::InvalidInput {
            field: String::from("week_start"),
            message: format!(
                "Booking week must start on a Monday, but {start_date} is a {weekday}"
            ),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Constraint failures surface as rule violations; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::InvalidRecord(domain_err) => translate_domain_error(domain_err),
        PersistenceError::DatabaseError(message) if message.contains("constraint") => {
            ApiError::DomainRuleViolation {
                rule: String::from("storage_constraint"),
                message,
            }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Translates a failed regeneration run into an API error.
#[must_use]
pub fn translate_regeneration_error(err: RegenerationError<PersistenceError>) -> ApiError {
    match err {
        RegenerationError::Domain(domain_err) => translate_domain_error(domain_err),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
