// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtbook_domain::DomainError;
use thiserror::Error;

/// Errors that abort a regeneration run.
///
/// `E` is the error type of the backing `ReservationStore`.
#[derive(Debug, Error)]
pub enum RegenerationError<E> {
    /// The target week could not be computed.
    #[error("Failed to compute the target week: {0}")]
    Domain(#[from] DomainError),

    /// Reading input data failed.
    #[error("Failed to load {what}: {source}")]
    LoadFailed {
        /// What was being loaded.
        what: &'static str,
        /// The store failure.
        #[source]
        source: E,
    },

    /// Clearing the week's previous reservations failed.
    #[error("Failed to delete previous reservations: {0}")]
    DeleteFailed(#[source] E),

    /// Persisting the new batch failed; nothing was persisted.
    #[error("Failed to persist generated reservations: {0}")]
    PersistFailed(#[source] E),
}

impl<E> RegenerationError<E> {
    /// Wraps a store failure raised while loading `what`.
    pub(crate) const fn load_failed(what: &'static str, source: E) -> Self {
        Self::LoadFailed { what, source }
    }
}
