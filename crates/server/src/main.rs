// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod store;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use shift_desk_api::{
    ApiEnvelope, CreateEntryRequest, CreateSubmissionRequest, RemoteEntry, RemotePeriod,
    RemoteSubmission, UpdateSubmissionRequest, parse_wire_date,
};
use shift_desk_domain::{HalfMonth, ShiftTime, is_identity_token};
use std::sync::Arc;
use store::{BackendStore, EntryPatch, NewPeriod, StoreError};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Shift Desk Server - in-memory reference backend for the shift engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Bearer token every request must carry. If not provided, requests are not checked.
    #[arg(short, long)]
    token: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Every record the backend holds.
    store: Arc<Mutex<BackendStore>>,
    /// The bearer token required on every request, if any.
    token: Option<Arc<str>>,
}

impl AppState {
    fn new(token: Option<String>) -> Self {
        Self {
            store: Arc::new(Mutex::new(BackendStore::default())),
            token: token.map(Arc::from),
        }
    }
}

/// Query parameters for listing periods.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeriodsQuery {
    store_id: Option<String>,
}

/// Query parameters for listing submissions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionsQuery {
    period_id: Option<String>,
}

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntriesQuery {
    submission_id: Option<String>,
}

/// API request for creating a period.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePeriodApiRequest {
    #[serde(alias = "store_id")]
    store_id: String,
    /// First day (`YYYY-MM-DD`).
    #[serde(alias = "start_date")]
    start_date: String,
    /// Last day (`YYYY-MM-DD`).
    #[serde(alias = "end_date")]
    end_date: String,
    /// Defaults to the half-month deadline of `start_date`.
    #[serde(default, alias = "submission_deadline")]
    submission_deadline: Option<String>,
}

/// API request for replacing the plan of an entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateEntryApiRequest {
    #[serde(default, alias = "start_time")]
    start_time: Option<ShiftTime>,
    #[serde(default, alias = "end_time")]
    end_time: Option<ShiftTime>,
    #[serde(default, alias = "is_holiday")]
    is_holiday: bool,
}

/// API response for deleting an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeletedResponse {
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ApiEnvelope<()>> = Json(ApiEnvelope::rejected(self.message));
        (self.status, body).into_response()
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        warn!(error = %err, "Store write rejected");
        let status: StatusCode = match err {
            StoreError::SubmissionNotFound(_) | StoreError::EntryNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            StoreError::SubmissionExists { .. } => StatusCode::CONFLICT,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

type ApiResult<T> = Result<Json<ApiEnvelope<T>>, HttpError>;

/// Rejects the request unless it carries the configured bearer token.
fn authorize(app_state: &AppState, headers: &HeaderMap) -> Result<(), HttpError> {
    let Some(expected) = &app_state.token else {
        return Ok(());
    };

    let presented: Option<&str> = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if presented == Some(expected.as_ref()) {
        Ok(())
    } else {
        Err(HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing or invalid bearer token"),
        })
    }
}

/// Current time as an RFC 3339 timestamp.
fn timestamp() -> Result<String, HttpError> {
    OffsetDateTime::now_utc().format(&Rfc3339).map_err(|e| {
        error!(error = %e, "Failed to format timestamp");
        HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Failed to format timestamp: {e}"),
        }
    })
}

fn parse_date(field: &str, value: &str) -> Result<Date, HttpError> {
    parse_wire_date(value).map_err(|e| HttpError::bad_request(format!("Invalid {field}: {e}")))
}

/// Handler for GET `/api/shift-periods` endpoint.
async fn handle_list_periods(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<PeriodsQuery>,
) -> ApiResult<Vec<RemotePeriod>> {
    authorize(&app_state, &headers)?;
    info!(store_id = ?query.store_id, "Handling list_periods request");

    let store = app_state.store.lock().await;
    Ok(Json(ApiEnvelope::ok(
        store.list_periods(query.store_id.as_deref()),
    )))
}

/// Handler for POST `/api/shift-periods` endpoint.
async fn handle_create_period(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePeriodApiRequest>,
) -> ApiResult<RemotePeriod> {
    authorize(&app_state, &headers)?;
    info!(
        store_id = %req.store_id,
        start_date = %req.start_date,
        end_date = %req.end_date,
        "Handling create_period request"
    );

    let start_date: Date = parse_date("startDate", &req.start_date)?;
    let end_date: Date = parse_date("endDate", &req.end_date)?;
    if end_date < start_date {
        return Err(HttpError::bad_request("endDate precedes startDate"));
    }
    let submission_deadline: Date = match &req.submission_deadline {
        Some(deadline) => parse_date("submissionDeadline", deadline)?,
        None => HalfMonth::containing(start_date)
            .submission_deadline()
            .map_err(|e| HttpError::bad_request(e.to_string()))?,
    };

    let mut store = app_state.store.lock().await;
    let period: RemotePeriod = store.add_period(NewPeriod {
        store_id: req.store_id,
        start_date,
        end_date,
        submission_deadline,
    });
    drop(store);

    info!(period_id = %period.id, "Created period");
    Ok(Json(ApiEnvelope::ok(period)))
}

/// Handler for GET `/api/shift-submissions` endpoint.
///
/// A `periodId` that is not an identity token is rejected.
async fn handle_list_submissions(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<SubmissionsQuery>,
) -> ApiResult<Vec<RemoteSubmission>> {
    authorize(&app_state, &headers)?;
    info!(period_id = ?query.period_id, "Handling list_submissions request");

    if let Some(period_id) = query
        .period_id
        .as_deref()
        .filter(|id| !is_identity_token(id))
    {
        return Err(HttpError::bad_request(format!(
            "Invalid periodId: {period_id}"
        )));
    }

    let store = app_state.store.lock().await;
    Ok(Json(ApiEnvelope::ok(
        store.list_submissions(query.period_id.as_deref()),
    )))
}

/// Handler for POST `/api/shift-submissions` endpoint.
async fn handle_create_submission(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateSubmissionRequest>,
) -> ApiResult<RemoteSubmission> {
    authorize(&app_state, &headers)?;
    info!(
        period_id = %req.period_id,
        employee_id = %req.employee_id,
        status = ?req.status,
        "Handling create_submission request"
    );

    let now: String = timestamp()?;
    let mut store = app_state.store.lock().await;
    let submission: RemoteSubmission = store.create_submission(&req, &now)?;
    drop(store);

    info!(submission_id = %submission.id, "Created submission");
    Ok(Json(ApiEnvelope::ok(submission)))
}

/// Handler for PUT `/api/shift-submissions/{id}` endpoint.
async fn handle_update_submission(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(submission_id): Path<String>,
    Json(req): Json<UpdateSubmissionRequest>,
) -> ApiResult<RemoteSubmission> {
    authorize(&app_state, &headers)?;
    info!(
        submission_id = %submission_id,
        status = ?req.status,
        "Handling update_submission request"
    );

    let now: String = timestamp()?;
    let mut store = app_state.store.lock().await;
    let submission: RemoteSubmission = store.update_submission(&submission_id, req.status, &now)?;
    Ok(Json(ApiEnvelope::ok(submission)))
}

/// Handler for POST `/api/shift-submissions/{id}/submit` endpoint.
async fn handle_submit_submission(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(submission_id): Path<String>,
) -> ApiResult<RemoteSubmission> {
    authorize(&app_state, &headers)?;
    info!(submission_id = %submission_id, "Handling submit_submission request");

    let now: String = timestamp()?;
    let mut store = app_state.store.lock().await;
    let submission: RemoteSubmission = store.submit(&submission_id, &now)?;
    Ok(Json(ApiEnvelope::ok(submission)))
}

/// Handler for GET `/api/shift-entries` endpoint.
async fn handle_list_entries(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<EntriesQuery>,
) -> ApiResult<Vec<RemoteEntry>> {
    authorize(&app_state, &headers)?;
    info!(submission_id = ?query.submission_id, "Handling list_entries request");

    let store = app_state.store.lock().await;
    Ok(Json(ApiEnvelope::ok(
        store.list_entries(query.submission_id.as_deref()),
    )))
}

/// Handler for POST `/api/shift-entries` endpoint.
async fn handle_create_entry(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateEntryRequest>,
) -> ApiResult<RemoteEntry> {
    authorize(&app_state, &headers)?;
    info!(
        submission_id = %req.submission_id,
        work_date = %req.work_date,
        "Handling create_entry request"
    );

    let mut store = app_state.store.lock().await;
    let entry: RemoteEntry = store.create_entry(&req)?;
    Ok(Json(ApiEnvelope::ok(entry)))
}

/// Handler for PUT `/api/shift-entries/{id}` endpoint.
async fn handle_update_entry(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(entry_id): Path<String>,
    Json(req): Json<UpdateEntryApiRequest>,
) -> ApiResult<RemoteEntry> {
    authorize(&app_state, &headers)?;
    info!(entry_id = %entry_id, "Handling update_entry request");

    let mut store = app_state.store.lock().await;
    let entry: RemoteEntry = store.update_entry(
        &entry_id,
        EntryPatch {
            start_time: req.start_time,
            end_time: req.end_time,
            is_holiday: req.is_holiday,
        },
    )?;
    Ok(Json(ApiEnvelope::ok(entry)))
}

/// Handler for DELETE `/api/shift-entries/{id}` endpoint.
async fn handle_delete_entry(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(entry_id): Path<String>,
) -> ApiResult<DeletedResponse> {
    authorize(&app_state, &headers)?;
    info!(entry_id = %entry_id, "Handling delete_entry request");

    let mut store = app_state.store.lock().await;
    let entry: RemoteEntry = store.delete_entry(&entry_id)?;
    Ok(Json(ApiEnvelope::ok(DeletedResponse {
        message: format!("Deleted shift entry for {}", entry.work_date),
    })))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/shift-periods",
            get(handle_list_periods).post(handle_create_period),
        )
        .route(
            "/api/shift-submissions",
            get(handle_list_submissions).post(handle_create_submission),
        )
        .route("/api/shift-submissions/{id}", put(handle_update_submission))
        .route(
            "/api/shift-submissions/{id}/submit",
            post(handle_submit_submission),
        )
        .route(
            "/api/shift-entries",
            get(handle_list_entries).post(handle_create_entry),
        )
        .route(
            "/api/shift-entries/{id}",
            put(handle_update_entry).delete(handle_delete_entry),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Shift Desk reference backend");
    if args.token.is_none() {
        warn!("No bearer token configured, requests are not checked");
    }

    let app: Router = build_router(AppState::new(args.token));

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
