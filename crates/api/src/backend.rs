// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The backend contract.

use shift_desk_domain::{IdentityToken, StoreId};

use crate::error::RemoteError;
use crate::request_response::{
    CreateEntryRequest, CreateSubmissionRequest, RemoteEntry, RemotePeriod, RemoteSubmission,
    UpdateSubmissionRequest,
};

/// The six remote operations the engine depends on.
///
/// Implementations report a rejection envelope or non-success status as
/// `RemoteError::Rejected` and anything that produced no usable response
/// as `Transport` or `Decode`. Callers rely on that split.
#[async_trait::async_trait]
pub trait ShiftBackend: Send + Sync {
    /// Returns the periods stored for a store.
    async fn get_shift_periods(&self, store_id: &StoreId)
    -> Result<Vec<RemotePeriod>, RemoteError>;

    /// Returns every submission recorded against a period.
    async fn get_shift_submissions(
        &self,
        period_id: &IdentityToken,
    ) -> Result<Vec<RemoteSubmission>, RemoteError>;

    /// Creates a submission.
    async fn create_shift_submission(
        &self,
        request: &CreateSubmissionRequest,
    ) -> Result<RemoteSubmission, RemoteError>;

    /// Updates an existing submission.
    async fn update_shift_submission(
        &self,
        submission_id: &str,
        request: &UpdateSubmissionRequest,
    ) -> Result<RemoteSubmission, RemoteError>;

    /// Returns the stored entries of a submission.
    async fn get_shift_entries(&self, submission_id: &str)
    -> Result<Vec<RemoteEntry>, RemoteError>;

    /// Stores one entry of a submission.
    async fn create_shift_entry(
        &self,
        request: &CreateEntryRequest,
    ) -> Result<RemoteEntry, RemoteError>;
}

#[async_trait::async_trait]
impl<T: ShiftBackend + ?Sized> ShiftBackend for std::sync::Arc<T> {
    async fn get_shift_periods(
        &self,
        store_id: &StoreId,
    ) -> Result<Vec<RemotePeriod>, RemoteError> {
        (**self).get_shift_periods(store_id).await
    }

    async fn get_shift_submissions(
        &self,
        period_id: &IdentityToken,
    ) -> Result<Vec<RemoteSubmission>, RemoteError> {
        (**self).get_shift_submissions(period_id).await
    }

    async fn create_shift_submission(
        &self,
        request: &CreateSubmissionRequest,
    ) -> Result<RemoteSubmission, RemoteError> {
        (**self).create_shift_submission(request).await
    }

    async fn update_shift_submission(
        &self,
        submission_id: &str,
        request: &UpdateSubmissionRequest,
    ) -> Result<RemoteSubmission, RemoteError> {
        (**self).update_shift_submission(submission_id, request).await
    }

    async fn get_shift_entries(
        &self,
        submission_id: &str,
    ) -> Result<Vec<RemoteEntry>, RemoteError> {
        (**self).get_shift_entries(submission_id).await
    }

    async fn create_shift_entry(
        &self,
        request: &CreateEntryRequest,
    ) -> Result<RemoteEntry, RemoteError> {
        (**self).create_shift_entry(request).await
    }
}
