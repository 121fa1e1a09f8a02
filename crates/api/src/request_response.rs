// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross the boundary as ISO 8601 (`YYYY-MM-DD`) strings and money as
//! minor units.

use courtbook::{ProfileSummary, SkippedProfile};
use courtbook_domain::Reservation;

/// A reservation as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReservationInfo {
    /// The canonical reservation identifier.
    pub reservation_id: Option<i64>,
    /// The booked venue.
    pub venue_id: i64,
    /// The owning user.
    pub owner_user_id: i64,
    /// The reservation date (ISO 8601).
    pub date: String,
    /// The slot label, e.g. `08:30-10:00`.
    pub slot: String,
    /// Price in minor units.
    pub price: u64,
    /// `reservation` or `maintenance`.
    pub kind: String,
    /// The reservation status.
    pub status: String,
}

impl From<&Reservation> for ReservationInfo {
    fn from(reservation: &Reservation) -> Self {
        Self {
            reservation_id: reservation.reservation_id,
            venue_id: reservation.venue_id,
            owner_user_id: reservation.owner_user_id,
            date: reservation.date.to_string(),
            slot: reservation.slot.label().to_string(),
            price: reservation.price.minor_units(),
            kind: reservation.kind.as_str().to_string(),
            status: reservation.status.as_str().to_string(),
        }
    }
}

/// What one ranked profile received in a run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProfileSummaryInfo {
    /// The profile identifier.
    pub profile_id: i64,
    /// 1-based priority position.
    pub position: usize,
    /// The category quota.
    pub quota: u8,
    /// Reservations granted.
    pub granted: u8,
    /// Total spend in minor units.
    pub spent: u64,
}

impl From<&ProfileSummary> for ProfileSummaryInfo {
    fn from(summary: &ProfileSummary) -> Self {
        Self {
            profile_id: summary.profile_id,
            position: summary.position,
            quota: summary.quota,
            granted: summary.granted,
            spent: summary.spent.minor_units(),
        }
    }
}

/// A profile that took no part in a run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SkippedProfileInfo {
    /// The profile identifier.
    pub profile_id: i64,
    /// The owning user.
    pub owner_user_id: i64,
    /// A human-readable reason.
    pub reason: String,
}

impl From<&SkippedProfile> for SkippedProfileInfo {
    fn from(skipped: &SkippedProfile) -> Self {
        Self {
            profile_id: skipped.profile_id,
            owner_user_id: skipped.owner_user_id,
            reason: skipped.reason.to_string(),
        }
    }
}

/// API response for a completed regeneration run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegenerateWeekResponse {
    /// First day of the regenerated week (a Monday).
    pub week_start: String,
    /// Last day of the regenerated week (a Sunday).
    pub week_end: String,
    /// Previous team bookings removed.
    pub deleted: usize,
    /// Reservations created.
    pub count: usize,
    /// The created reservations.
    pub reservations: Vec<ReservationInfo>,
    /// Per-profile results in priority order.
    pub summaries: Vec<ProfileSummaryInfo>,
    /// Profiles skipped because of data problems or ineligibility.
    pub skipped: Vec<SkippedProfileInfo>,
    /// A success message.
    pub message: String,
}

/// API request to list the reservations of one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListReservationsRequest {
    /// The Monday that starts the week (ISO 8601).
    pub week_start: String,
}

/// API response listing a week's reservations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListReservationsResponse {
    /// First day of the week.
    pub week_start: String,
    /// Last day of the week.
    pub week_end: String,
    /// Reservations ordered by date, slot and venue.
    pub reservations: Vec<ReservationInfo>,
}

/// API request to block a slot for venue maintenance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateMaintenanceBlockRequest {
    /// The venue to block.
    pub venue_id: i64,
    /// The administrator recording the block.
    pub owner_user_id: i64,
    /// The blocked date (ISO 8601).
    pub date: String,
    /// The blocked slot label.
    pub slot: String,
}

/// API response for a recorded maintenance block.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateMaintenanceBlockResponse {
    /// The stored block.
    pub reservation: ReservationInfo,
    /// A success message.
    pub message: String,
}
