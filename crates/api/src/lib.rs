// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-facing layer of the shift engine.
//!
//! This crate owns everything that talks to the outside world: the
//! backend contract and its HTTP client, identity resolution, the clock,
//! reconciliation, and the submission write. `ShiftService` ties them to
//! the pure state model in `shift-desk` and the draft store in
//! `shift-desk-persistence`.

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

mod auth;
mod backend;
mod clock;
mod config;
mod error;
mod http;
mod request_response;
mod service;
mod submission;
mod sync;

#[cfg(test)]
mod tests;

pub use auth::{EMPLOYEE_CLAIM, IdentityProvider, StaticIdentity, UnverifiedTokenClaims};
pub use backend::ShiftBackend;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use error::{AuthError, EngineError, RemoteError};
pub use http::{HttpShiftBackend, decode_body};
pub use request_response::{
    ApiEnvelope, CreateEntryRequest, CreateSubmissionRequest, RemoteEntry, RemotePeriod,
    RemoteSubmission, SubmissionState, UpdateSubmissionRequest, parse_timestamp, parse_wire_date,
};
pub use service::ShiftService;
pub use submission::{
    AbortReason, PushedSubmission, SubmissionCoordinator, SubmissionOutcome, check_draft,
};
pub use sync::{RemoteSync, merge_periods};
