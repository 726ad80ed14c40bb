// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `reqwest` implementation of the backend contract.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shift_desk_domain::{IdentityToken, StoreId};
use tracing::debug;

use crate::backend::ShiftBackend;
use crate::error::RemoteError;
use crate::request_response::{
    CreateEntryRequest, CreateSubmissionRequest, RemoteEntry, RemotePeriod, RemoteSubmission,
    UpdateSubmissionRequest,
};

/// HTTP client for the shift backend.
///
/// The bearer token is sent on every request; do not log it.
#[derive(Clone)]
pub struct HttpShiftBackend {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for HttpShiftBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpShiftBackend")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl HttpShiftBackend {
    /// Creates a client for `base_url` (for example `http://localhost:8000/api`).
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder: RequestBuilder = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            return builder.bearer_auth(token);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, RemoteError> {
        debug!("Calling backend endpoint {}", path);

        let response: Response = builder.send().await.map_err(|e| RemoteError::Transport {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })?;
        let status: StatusCode = response.status();
        let text: String = response.text().await.map_err(|e| RemoteError::Transport {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })?;

        decode_body(path, status, &text)
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        self.send(path, self.request(method, path).json(body)).await
    }
}

/// Interprets a backend response body.
///
/// Mirrors the backend's conventions: a body that is not JSON or a
/// non-success status is a rejection carrying the body's `error` field;
/// `{"success": false}` is a rejection; otherwise the payload is the
/// `data` field when present and the whole body when not.
///
/// # Errors
///
/// Returns `Rejected` or `Decode` as described above.
pub fn decode_body<T: DeserializeOwned>(
    path: &str,
    status: StatusCode,
    text: &str,
) -> Result<T, RemoteError> {
    let rejected = |message: String| RemoteError::Rejected {
        endpoint: path.to_string(),
        message,
    };

    let Ok(body) = serde_json::from_str::<Value>(text) else {
        return Err(rejected(if text.is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            text.to_string()
        }));
    };

    let error_message = || {
        body.get("error")
            .and_then(Value::as_str)
            .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
    };

    if !status.is_success() && status != StatusCode::NOT_MODIFIED {
        return Err(rejected(error_message()));
    }
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(rejected(error_message()));
    }

    let data: Option<Value> = body.get("data").filter(|d| !d.is_null()).cloned();
    let payload: Value = data.unwrap_or(body);

    serde_json::from_value(payload).map_err(|e| RemoteError::Decode {
        endpoint: path.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait::async_trait]
impl ShiftBackend for HttpShiftBackend {
    async fn get_shift_periods(
        &self,
        store_id: &StoreId,
    ) -> Result<Vec<RemotePeriod>, RemoteError> {
        let path: &str = "/shift-periods";
        let builder: RequestBuilder = self
            .request(Method::GET, path)
            .query(&[("storeId", store_id.value())]);
        self.send(path, builder).await
    }

    async fn get_shift_submissions(
        &self,
        period_id: &IdentityToken,
    ) -> Result<Vec<RemoteSubmission>, RemoteError> {
        let path: &str = "/shift-submissions";
        let builder: RequestBuilder = self
            .request(Method::GET, path)
            .query(&[("periodId", period_id.as_str())]);
        self.send(path, builder).await
    }

    async fn create_shift_submission(
        &self,
        request: &CreateSubmissionRequest,
    ) -> Result<RemoteSubmission, RemoteError> {
        self.send_json(Method::POST, "/shift-submissions", request)
            .await
    }

    async fn update_shift_submission(
        &self,
        submission_id: &str,
        request: &UpdateSubmissionRequest,
    ) -> Result<RemoteSubmission, RemoteError> {
        let path: String = format!("/shift-submissions/{submission_id}");
        self.send_json(Method::PUT, &path, request).await
    }

    async fn get_shift_entries(
        &self,
        submission_id: &str,
    ) -> Result<Vec<RemoteEntry>, RemoteError> {
        let path: &str = "/shift-entries";
        let builder: RequestBuilder = self
            .request(Method::GET, path)
            .query(&[("submissionId", submission_id)]);
        self.send(path, builder).await
    }

    async fn create_shift_entry(
        &self,
        request: &CreateEntryRequest,
    ) -> Result<RemoteEntry, RemoteError> {
        self.send_json(Method::POST, "/shift-entries", request)
            .await
    }
}
