// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use shift_desk::CoreError;
use shift_desk_domain::DomainError;
use shift_desk_persistence::PersistenceError;
use thiserror::Error;

/// Failures talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced a response.
    #[error("Request to {endpoint} failed: {reason}")]
    Transport {
        /// The endpoint that was called.
        endpoint: String,
        /// The underlying failure.
        reason: String,
    },
    /// The backend answered with a rejection envelope or a non-success status.
    #[error("Backend rejected {endpoint}: {message}")]
    Rejected {
        /// The endpoint that was called.
        endpoint: String,
        /// The backend's error message.
        message: String,
    },
    /// The backend answered with a body that could not be decoded.
    #[error("Malformed response from {endpoint}: {reason}")]
    Decode {
        /// The endpoint that was called.
        endpoint: String,
        /// The decoding failure.
        reason: String,
    },
}

impl RemoteError {
    /// Returns whether the backend answered and said no.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Failures resolving the current employee.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential is available.
    #[error("No credential available")]
    MissingCredential,
    /// The credential is not a decodable token.
    #[error("Malformed token: {reason}")]
    MalformedToken {
        /// Why decoding failed.
        reason: String,
    },
    /// The token does not carry the required claim.
    #[error("Token is missing the '{claim}' claim")]
    MissingClaim {
        /// The absent claim.
        claim: String,
    },
    /// The claim is present but not a usable employee id.
    #[error("Invalid employee claim: {0}")]
    InvalidClaim(#[from] DomainError),
}

/// Errors surfaced by `ShiftService`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A domain value was invalid.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// A command could not be applied.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// Drafts could not be loaded or saved.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
