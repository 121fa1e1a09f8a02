// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::slots::TimeSlot;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// A monetary amount in minor currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Converts a signed stored amount, rejecting negative values.
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is negative.
    pub fn from_signed(field: &'static str, amount: i64) -> Result<Self, DomainError> {
        u64::try_from(amount)
            .map(Self)
            .map_err(|_| DomainError::NegativeAmount { field, amount })
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// Subtracts `other`, returning `None` if the result would be negative.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, amount| acc + amount)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The age category a team competes in.
///
/// Unknown labels are kept verbatim and rank below every known category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgeCategory {
    /// Adult teams.
    Senior,
    /// Juniors aged 17-18.
    Under18,
    /// Juniors aged 15-16.
    Under16,
    /// Juniors aged 0-14.
    Under14,
    /// Any other label.
    Unrecognized(String),
}

impl AgeCategory {
    /// Returns the stored label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Senior => "senior",
            Self::Under18 => "17-18",
            Self::Under16 => "15-16",
            Self::Under14 => "0-14",
            Self::Unrecognized(label) => label,
        }
    }

    /// Returns whether this is the senior category.
    #[must_use]
    pub const fn is_senior(&self) -> bool {
        matches!(self, Self::Senior)
    }
}

impl From<&str> for AgeCategory {
    fn from(value: &str) -> Self {
        match value.trim() {
            "senior" => Self::Senior,
            "17-18" => Self::Under18,
            "15-16" => Self::Under16,
            "0-14" => Self::Under14,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for AgeCategory {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<AgeCategory> for String {
    fn from(category: AgeCategory) -> Self {
        category.as_str().to_string()
    }
}

impl std::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of the day a team prefers to play in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PreferredInterval {
    /// 08:00 to 12:00.
    Morning,
    /// 12:00 to 17:00.
    Afternoon,
    /// 17:00 to 23:00.
    Evening,
    /// No preference (unset or unknown label); 08:00 to 23:00.
    #[default]
    FullDay,
}

impl PreferredInterval {
    /// Parses a stored label. Missing or unknown labels mean no preference.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("morning") => Self::Morning,
            Some("afternoon") => Self::Afternoon,
            Some("evening") => Self::Evening,
            _ => Self::FullDay,
        }
    }

    /// Returns the stored label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::FullDay => "other",
        }
    }
}

impl std::fmt::Display for PreferredInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status of a team owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountStatus {
    /// Active account.
    Active,
    /// Verified account.
    Verified,
    /// Registration not yet confirmed.
    Pending,
    /// Suspended by an administrator.
    Suspended,
    /// Any other status.
    Unrecognized(String),
}

impl AccountStatus {
    /// Returns the stored label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Verified => "verified",
            Self::Pending => "pending",
            Self::Suspended => "suspended",
            Self::Unrecognized(label) => label,
        }
    }

    /// Only active and verified accounts take part in automated booking.
    #[must_use]
    pub const fn permits_booking(&self) -> bool {
        matches!(self, Self::Active | Self::Verified)
    }
}

impl From<&str> for AccountStatus {
    fn from(value: &str) -> Self {
        match value.trim() {
            "active" => Self::Active,
            "verified" => Self::Verified,
            "pending" => Self::Pending,
            "suspended" => Self::Suspended,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for AccountStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<AccountStatus> for String {
    fn from(status: AccountStatus) -> Self {
        status.as_str().to_string()
    }
}

/// The user that owns a reservation profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOwner {
    /// The user's canonical ID.
    pub user_id: i64,
    /// Display name of the user or team.
    pub display_name: String,
    /// Team type designation; `None` or empty when the user is not a team.
    pub team_type: Option<String>,
    /// Account status.
    pub account_status: AccountStatus,
}

impl TeamOwner {
    /// Returns whether the owner carries a non-empty team type.
    #[must_use]
    pub fn has_team_type(&self) -> bool {
        self.team_type
            .as_deref()
            .is_some_and(|team_type| !team_type.trim().is_empty())
    }
}

/// Operating status of a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VenueStatus {
    /// Open for bookings.
    #[default]
    Active,
    /// Temporarily closed.
    Inactive,
}

impl VenueStatus {
    /// Returns the stored label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for VenueStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidVenueStatus(s.to_string())),
        }
    }
}

/// A sports hall that can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// The venue's canonical ID.
    pub venue_id: i64,
    /// Display name.
    pub name: String,
    /// City the venue is located in.
    pub city: String,
    /// Price of one slot.
    pub tariff: Money,
    /// Operating status.
    pub status: VenueStatus,
}

/// A team's booking policy for the week.
///
/// Read-only to the allocator. Budget consumption during a run is tracked
/// on a working copy, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationProfile {
    /// The profile's canonical ID.
    pub profile_id: i64,
    /// The owning user.
    pub owner_user_id: i64,
    /// Age category of the team.
    pub age_category: AgeCategory,
    /// Maximum total spend per week.
    pub weekly_budget: Money,
    /// Preferred part of the day.
    pub preferred_interval: PreferredInterval,
    /// City the team plays in.
    pub city: String,
    /// Candidate venues, in the order the owner listed them.
    pub venue_ids: Vec<i64>,
}

/// Distinguishes bookable reservations from administrative blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationKind {
    /// A slot booked by a team.
    Reservation,
    /// A slot blocked by venue administration.
    Maintenance,
}

impl ReservationKind {
    /// Returns the stored label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reservation => "reservation",
            Self::Maintenance => "maintenance",
        }
    }
}

impl FromStr for ReservationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reservation" => Ok(Self::Reservation),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(DomainError::InvalidReservationKind(s.to_string())),
        }
    }
}

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Created, awaiting payment.
    #[default]
    Pending,
    /// Paid or otherwise confirmed.
    Confirmed,
    /// Cancelled.
    Cancelled,
}

impl ReservationStatus {
    /// Returns the stored label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidReservationStatus(s.to_string())),
        }
    }
}

/// One occupied (venue, date, slot) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// The canonical ID assigned by the database.
    /// `None` indicates the reservation has not been persisted yet.
    pub reservation_id: Option<i64>,
    /// The booked venue.
    pub venue_id: i64,
    /// The user the reservation belongs to.
    pub owner_user_id: i64,
    /// Calendar date.
    pub date: Date,
    /// Catalog slot.
    pub slot: TimeSlot,
    /// Price charged.
    pub price: Money,
    /// Reservation or maintenance block.
    pub kind: ReservationKind,
    /// Lifecycle status.
    pub status: ReservationStatus,
}

impl Reservation {
    /// Creates an unpersisted team booking.
    #[must_use]
    pub const fn booking(
        venue_id: i64,
        owner_user_id: i64,
        date: Date,
        slot: TimeSlot,
        price: Money,
    ) -> Self {
        Self {
            reservation_id: None,
            venue_id,
            owner_user_id,
            date,
            slot,
            price,
            kind: ReservationKind::Reservation,
            status: ReservationStatus::Pending,
        }
    }

    /// Creates an unpersisted maintenance block.
    #[must_use]
    pub const fn maintenance(
        venue_id: i64,
        owner_user_id: i64,
        date: Date,
        slot: TimeSlot,
    ) -> Self {
        Self {
            reservation_id: None,
            venue_id,
            owner_user_id,
            date,
            slot,
            price: Money::ZERO,
            kind: ReservationKind::Maintenance,
            status: ReservationStatus::Confirmed,
        }
    }

    /// Returns a copy carrying the given persisted ID.
    #[must_use]
    pub const fn with_id(mut self, reservation_id: i64) -> Self {
        self.reservation_id = Some(reservation_id);
        self
    }

    /// Returns whether this is a team booking rather than a block.
    #[must_use]
    pub const fn is_booking(&self) -> bool {
        matches!(self.kind, ReservationKind::Reservation)
    }
}
