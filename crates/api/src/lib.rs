// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Courtbook venue reservation system.
//!
//! Handlers take the persistence layer explicitly, translate every lower
//! layer error into an `ApiError`, and return transport-neutral DTOs. The
//! server crate maps them onto HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_domain_error, translate_persistence_error, translate_regeneration_error,
};
pub use handlers::{create_maintenance_block, list_week_reservations, parse_date, regenerate_week};
pub use request_response::{
    CreateMaintenanceBlockRequest, CreateMaintenanceBlockResponse, ListReservationsRequest,
    ListReservationsResponse, ProfileSummaryInfo, RegenerateWeekResponse, ReservationInfo,
    SkippedProfileInfo,
};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
