// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `admin` - Users, venues and reservation profiles
//! - `reservations` - Reservation batches and maintenance blocks

pub mod admin;
pub mod reservations;

pub use admin::{create_profile, create_user, create_venue, delete_venue};
pub use reservations::{delete_reservations, insert_reservation, insert_reservations};
