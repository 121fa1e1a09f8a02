// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Selection of the profiles that take part in a weekly run.
//!
//! A profile is eligible iff its owner exists, carries a non-empty team
//! type, and has an `active` or `verified` account. Ineligible profiles
//! are dropped before ranking; they are reported, never treated as errors.

use crate::types::{AccountStatus, ReservationProfile, TeamOwner};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Why a profile was left out of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Ineligibility {
    /// The owning user no longer exists.
    OwnerMissing {
        /// The dangling user reference.
        owner_user_id: i64,
    },
    /// The owner has no team type.
    NoTeamType,
    /// The owner's account is neither active nor verified.
    AccountNotActive {
        /// The owner's current status.
        status: AccountStatus,
    },
}

impl std::fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OwnerMissing { owner_user_id } => {
                write!(f, "owner {owner_user_id} does not exist")
            }
            Self::NoTeamType => write!(f, "owner has no team type"),
            Self::AccountNotActive { status } => {
                write!(f, "owner account status is '{}'", status.as_str())
            }
        }
    }
}

/// Result of filtering a roster of profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityOutcome {
    /// Profiles that take part, in input order.
    pub eligible: Vec<ReservationProfile>,
    /// Profiles left out, with the reason.
    pub rejected: Vec<(ReservationProfile, Ineligibility)>,
}

/// Checks a single profile against its owner.
///
/// # Errors
///
/// Returns the reason the profile cannot take part.
pub fn check_eligibility(
    profile: &ReservationProfile,
    owner: Option<&TeamOwner>,
) -> Result<(), Ineligibility> {
    let owner: &TeamOwner = owner.ok_or(Ineligibility::OwnerMissing {
        owner_user_id: profile.owner_user_id,
    })?;

    if !owner.has_team_type() {
        return Err(Ineligibility::NoTeamType);
    }

    if !owner.account_status.permits_booking() {
        return Err(Ineligibility::AccountNotActive {
            status: owner.account_status.clone(),
        });
    }

    Ok(())
}

/// Splits `profiles` into eligible and rejected sets.
#[must_use]
pub fn filter_eligible(
    profiles: Vec<ReservationProfile>,
    owners: &[TeamOwner],
) -> EligibilityOutcome {
    let owners_by_id: HashMap<i64, &TeamOwner> =
        owners.iter().map(|owner| (owner.user_id, owner)).collect();

    let mut outcome: EligibilityOutcome = EligibilityOutcome::default();
    for profile in profiles {
        let owner: Option<&TeamOwner> = owners_by_id.get(&profile.owner_user_id).copied();
        match check_eligibility(&profile, owner) {
            Ok(()) => outcome.eligible.push(profile),
            Err(reason) => outcome.rejected.push((profile, reason)),
        }
    }
    outcome
}
