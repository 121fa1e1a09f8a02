// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The fixed daily slot catalog.
//!
//! Every venue shares the same eleven 90-minute slots, starting at 07:00 and
//! ending at 23:30 with no gaps. Per-venue opening hours are not consulted
//! when allocating.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of slots in the daily catalog.
pub const SLOT_COUNT: usize = 11;

/// Start of the first slot, in minutes after midnight.
const FIRST_SLOT_START: u16 = 7 * 60;

/// Length of every slot, in minutes.
const SLOT_LENGTH: u16 = 90;

const SLOT_LABELS: [&str; SLOT_COUNT] = [
    "07:00-08:30",
    "08:30-10:00",
    "10:00-11:30",
    "11:30-13:00",
    "13:00-14:30",
    "14:30-16:00",
    "16:00-17:30",
    "17:30-19:00",
    "19:00-20:30",
    "20:30-22:00",
    "22:00-23:30",
];

/// One entry of the daily slot catalog.
///
/// Serialized as its label (e.g. `"08:30-10:00"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    index: u8,
}

impl TimeSlot {
    /// Returns the slot at the given catalog position.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not below [`SLOT_COUNT`].
    pub fn from_index(index: usize) -> Result<Self, DomainError> {
        u8::try_from(index)
            .ok()
            .filter(|_| index < SLOT_COUNT)
            .map(|index| Self { index })
            .ok_or(DomainError::SlotIndexOutOfRange {
                index,
                catalog_len: SLOT_COUNT,
            })
    }

    /// Looks up a slot by its label.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is not in the catalog.
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        SLOT_LABELS
            .iter()
            .position(|candidate| *candidate == label.trim())
            .map_or_else(
                || Err(DomainError::UnknownSlotLabel(label.to_string())),
                Self::from_index,
            )
    }

    /// Iterates the whole catalog in chronological order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SLOT_COUNT).filter_map(|index| Self::from_index(index).ok())
    }

    /// Returns the position of this slot in the catalog.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.index)
    }

    /// Returns the catalog label.
    #[must_use]
    pub fn label(self) -> &'static str {
        SLOT_LABELS[self.index()]
    }

    /// Start of the slot, in minutes after midnight.
    #[must_use]
    pub fn start_minute(self) -> u16 {
        FIRST_SLOT_START + SLOT_LENGTH * u16::from(self.index)
    }

    /// End of the slot, in minutes after midnight.
    #[must_use]
    pub fn end_minute(self) -> u16 {
        self.start_minute() + SLOT_LENGTH
    }

    /// Start of the slot as a wall-clock time.
    #[must_use]
    pub fn start_time(self) -> time::Time {
        time::Time::MIDNIGHT + time::Duration::minutes(i64::from(self.start_minute()))
    }

    /// End of the slot as a wall-clock time.
    #[must_use]
    pub fn end_time(self) -> time::Time {
        time::Time::MIDNIGHT + time::Duration::minutes(i64::from(self.end_minute()))
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_label(&value)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.label().to_string()
    }
}
