// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtbook::RegenerationError;
use courtbook_domain::DomainError;
use courtbook_persistence::PersistenceError;

use crate::{
    ApiError, translate_domain_error, translate_persistence_error, translate_regeneration_error,
};

#[test]
fn test_domain_error_becomes_invalid_input() {
    let err: ApiError = translate_domain_error(DomainError::UnknownSlotLabel(String::from("x")));

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("slot"),
            message: String::from("Unknown slot label 'x'"),
        }
    );
}

#[test]
fn test_not_found_becomes_resource_not_found() {
    let err: ApiError = translate_persistence_error(PersistenceError::NotFound(String::from(
        "Venue 3 not found",
    )));

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_rejected_record_uses_domain_translation() {
    let err: ApiError = translate_persistence_error(PersistenceError::InvalidRecord(
        DomainError::DuplicateCandidateVenue { venue_id: 7 },
    ));

    assert_eq!(
        err,
        ApiError::DomainRuleViolation {
            rule: String::from("unique_candidate_venue"),
            message: String::from("Profile lists venue 7 more than once"),
        }
    );
}

#[test]
fn test_other_persistence_errors_are_internal() {
    let err: ApiError =
        translate_persistence_error(PersistenceError::QueryFailed(String::from("disk I/O")));

    assert_eq!(err.to_string(), "Internal error: Query failed: disk I/O");
}

#[test]
fn test_store_failures_during_regeneration_are_internal() {
    let err: ApiError = translate_regeneration_error(RegenerationError::DeleteFailed(
        PersistenceError::QueryFailed(String::from("locked")),
    ));

    assert_eq!(
        err,
        ApiError::Internal {
            message: String::from("Failed to delete previous reservations: Query failed: locked"),
        }
    );
}

#[test]
fn test_regeneration_in_progress_display() {
    assert_eq!(
        ApiError::RegenerationInProgress.to_string(),
        "A regeneration run is already in progress"
    );
}
