// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{ReservationProfile, Venue};
use std::collections::HashSet;

/// Validates that a venue's field constraints are met.
///
/// # Arguments
///
/// * `venue` - The venue to validate
///
/// # Errors
///
/// Returns an error if:
/// - The venue's name is empty
/// - The venue's city is empty
pub fn validate_venue(venue: &Venue) -> Result<(), DomainError> {
    if venue.name.trim().is_empty() {
        return Err(DomainError::InvalidVenueName(String::from(
            "Venue name cannot be empty",
        )));
    }

    validate_city(&venue.city)
}

/// Validates that a reservation profile's field constraints are met.
///
/// Candidate venues are not resolved here; a profile pointing at a venue
/// that no longer exists is handled at allocation time.
///
/// # Arguments
///
/// * `profile` - The profile to validate
///
/// # Errors
///
/// Returns an error if:
/// - The profile's city is empty
/// - The profile lists a venue more than once
pub fn validate_profile(profile: &ReservationProfile) -> Result<(), DomainError> {
    validate_city(&profile.city)?;

    let mut seen: HashSet<i64> = HashSet::new();
    for venue_id in &profile.venue_ids {
        if !seen.insert(*venue_id) {
            return Err(DomainError::DuplicateCandidateVenue {
                venue_id: *venue_id,
            });
        }
    }

    Ok(())
}

fn validate_city(city: &str) -> Result<(), DomainError> {
    if city.trim().is_empty() {
        return Err(DomainError::InvalidCity(String::from(
            "City cannot be empty",
        )));
    }
    Ok(())
}
