// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use courtbook::{RegenerationOutcome, ReservationStore};
use courtbook_domain::{AllocationPolicy, BookingWeek, Reservation, TimeSlot, Venue};
use courtbook_persistence::Persistence;
use rand::Rng;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::info;

use crate::error::{
    ApiError, translate_domain_error, translate_persistence_error, translate_regeneration_error,
};
use crate::request_response::{
    CreateMaintenanceBlockRequest, CreateMaintenanceBlockResponse, ListReservationsRequest,
    ListReservationsResponse, ProfileSummaryInfo, RegenerateWeekResponse, ReservationInfo,
    SkippedProfileInfo,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses an ISO 8601 calendar date.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the string is not a valid date.
pub fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse date '{value}': {e}"),
    })
}

/// Regenerates team bookings for the week following `today`.
///
/// The caller must hold the run lock; runs must not overlap.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `today` - The run date in the operator's timezone
/// * `policy` - Quotas, windows and age partition
/// * `rng` - The run's random source
///
/// # Errors
///
/// Returns an error if the store fails while clearing, loading or
/// persisting. Per-profile data problems are reported in `skipped`.
pub fn regenerate_week<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    today: Date,
    policy: &AllocationPolicy,
    rng: &mut R,
) -> Result<RegenerateWeekResponse, ApiError> {
    let outcome: RegenerationOutcome = courtbook::regenerate_week(persistence, today, policy, rng)
        .map_err(translate_regeneration_error)?;

    info!(
        week = %outcome.week,
        created = outcome.count(),
        skipped = outcome.skipped.len(),
        "Regeneration request completed"
    );

    Ok(RegenerateWeekResponse {
        week_start: outcome.week.start().to_string(),
        week_end: outcome.week.end().to_string(),
        deleted: outcome.deleted,
        count: outcome.count(),
        reservations: outcome
            .reservations
            .iter()
            .map(ReservationInfo::from)
            .collect(),
        summaries: outcome
            .summaries
            .iter()
            .map(ProfileSummaryInfo::from)
            .collect(),
        skipped: outcome
            .skipped
            .iter()
            .map(SkippedProfileInfo::from)
            .collect(),
        message: format!(
            "Generated {} reservations for the week of {}",
            outcome.count(),
            outcome.week.start()
        ),
    })
}

/// Lists every reservation, of any kind, in one booking week.
///
/// # Errors
///
/// Returns an error if `week_start` is not a Monday in ISO 8601 form or the
/// query fails.
pub fn list_week_reservations(
    persistence: &mut Persistence,
    request: &ListReservationsRequest,
) -> Result<ListReservationsResponse, ApiError> {
    let monday: Date = parse_date("week_start", &request.week_start)?;
    let week: BookingWeek = BookingWeek::starting(monday).map_err(translate_domain_error)?;

    let reservations: Vec<Reservation> = persistence
        .list_reservations_in_week(&week)
        .map_err(translate_persistence_error)?;

    Ok(ListReservationsResponse {
        week_start: week.start().to_string(),
        week_end: week.end().to_string(),
        reservations: reservations.iter().map(ReservationInfo::from).collect(),
    })
}

/// Blocks one venue slot for maintenance.
///
/// Maintenance blocks survive regeneration and are never allocated over.
///
/// # Errors
///
/// Returns an error if:
/// - The date or slot label is invalid
/// - The venue does not exist
/// - The slot is already taken
pub fn create_maintenance_block(
    persistence: &mut Persistence,
    request: &CreateMaintenanceBlockRequest,
) -> Result<CreateMaintenanceBlockResponse, ApiError> {
    let date: Date = parse_date("date", &request.date)?;
    let slot: TimeSlot =
        TimeSlot::from_label(request.slot.trim()).map_err(translate_domain_error)?;

    let venue: Option<Venue> = persistence
        .get_venue(request.venue_id)
        .map_err(translate_persistence_error)?;
    if venue.is_none() {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Venue"),
            message: format!("Venue {} does not exist", request.venue_id),
        });
    }

    let block: Reservation = persistence
        .create_maintenance_block(request.venue_id, request.owner_user_id, date, slot)
        .map_err(translate_persistence_error)?;

    info!(
        venue_id = request.venue_id,
        date = %date,
        slot = slot.label(),
        "Recorded maintenance block"
    );

    Ok(CreateMaintenanceBlockResponse {
        reservation: ReservationInfo::from(&block),
        message: format!(
            "Blocked {} on {date} at venue {}",
            slot.label(),
            request.venue_id
        ),
    })
}
