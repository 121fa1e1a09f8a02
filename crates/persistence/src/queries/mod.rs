// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `users` - Team owners
//! - `venues` - Venues
//! - `profiles` - Reservation profiles and their candidate venues
//! - `reservations` - Reservations and maintenance blocks

pub mod profiles;
pub mod reservations;
pub mod users;
pub mod venues;

pub use profiles::list_profiles;
pub use reservations::{get_reservation, list_reservations_between};
pub use users::{get_user, list_users};
pub use venues::{get_venue, list_venues};
