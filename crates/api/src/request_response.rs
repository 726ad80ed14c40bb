// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend request and response data transfer objects.
//!
//! These mirror the backend's JSON contract and are deliberately looser
//! than the domain types: ids arrive as raw strings (or numbers), dates may
//! carry a time suffix, and unknown submission states are tolerated.
//! Conversion into domain types happens in `sync` and `submission`.

use serde::{Deserialize, Deserializer, Serialize};
use shift_desk_domain::{DomainError, ShiftEntry, ShiftTime, parse_iso_date};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

/// The backend's response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// The payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// The error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Wraps a successful payload.
    pub const fn ok(data: T) -> Self {
        Self {
            success: Some(true),
            data: Some(data),
            error: None,
        }
    }

    /// Builds a rejection carrying `message`.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Lifecycle state of a backend submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Draft,
    Submitted,
    Approved,
    Rejected,
    /// Any value this build does not recognise.
    #[serde(other)]
    Unknown,
}

/// A period as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePeriod {
    /// The backend's id, not yet validated.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(
        default,
        alias = "store_id",
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_id: Option<String>,
    #[serde(alias = "start_date", with = "wire_date")]
    pub start_date: Date,
    #[serde(alias = "end_date", with = "wire_date")]
    pub end_date: Date,
    #[serde(default, alias = "is_first_half", skip_serializing_if = "Option::is_none")]
    pub is_first_half: Option<bool>,
    #[serde(
        default,
        alias = "submission_deadline",
        with = "optional_wire_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub submission_deadline: Option<Date>,
}

/// An employee's submission for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSubmission {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(
        default,
        alias = "period_id",
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_id: Option<String>,
    #[serde(alias = "employee_id", deserialize_with = "string_or_number")]
    pub employee_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SubmissionState>,
    /// Boolean flag used by backends that predate `status`.
    #[serde(default, alias = "is_submitted", skip_serializing_if = "Option::is_none")]
    pub is_submitted: Option<bool>,
    #[serde(default, alias = "submitted_at", skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl RemoteSubmission {
    /// Returns whether this submission counts as turned in.
    ///
    /// `status` wins when present; only `submitted` qualifies.
    #[must_use]
    pub fn counts_as_submitted(&self) -> bool {
        self.status.map_or_else(
            || self.is_submitted.unwrap_or(false),
            |status| status == SubmissionState::Submitted,
        )
    }

    /// The submission timestamp, falling back to the creation time.
    #[must_use]
    pub fn effective_submitted_at(&self) -> Option<OffsetDateTime> {
        self.submitted_at
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.created_at.as_deref().and_then(parse_timestamp))
    }
}

/// One stored day of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntry {
    #[serde(
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        alias = "submission_id",
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub submission_id: Option<String>,
    #[serde(rename = "work_date", alias = "workDate", alias = "date", with = "wire_date")]
    pub work_date: Date,
    #[serde(default, alias = "start_time")]
    pub start_time: Option<String>,
    #[serde(default, alias = "end_time")]
    pub end_time: Option<String>,
    #[serde(default, alias = "is_holiday")]
    pub is_holiday: bool,
}

impl RemoteEntry {
    /// Converts into a domain entry.
    ///
    /// # Errors
    ///
    /// Returns an error if a time is not a valid half-hour value.
    pub fn to_entry(&self) -> Result<ShiftEntry, DomainError> {
        let start_time: Option<ShiftTime> =
            self.start_time.as_deref().map(ShiftTime::parse).transpose()?;
        let end_time: Option<ShiftTime> =
            self.end_time.as_deref().map(ShiftTime::parse).transpose()?;
        Ok(ShiftEntry::blank(self.work_date).with_plan(start_time, end_time, self.is_holiday))
    }
}

/// Request body for creating a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub period_id: String,
    pub employee_id: String,
    pub status: SubmissionState,
    #[serde(default)]
    pub shift_entries: Vec<ShiftEntry>,
}

/// Request body for updating a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubmissionRequest {
    pub status: SubmissionState,
    #[serde(default)]
    pub shift_entries: Vec<ShiftEntry>,
}

/// Request body for creating one entry of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub submission_id: String,
    #[serde(rename = "work_date", alias = "workDate", alias = "date", with = "wire_date")]
    pub work_date: Date,
    pub start_time: Option<ShiftTime>,
    pub end_time: Option<ShiftTime>,
    #[serde(default)]
    pub is_holiday: bool,
}

impl CreateEntryRequest {
    /// Builds the request for one draft entry.
    #[must_use]
    pub fn for_entry(submission_id: &str, entry: &ShiftEntry) -> Self {
        Self {
            submission_id: submission_id.to_string(),
            work_date: entry.work_date,
            start_time: entry.start_time,
            end_time: entry.end_time,
            is_holiday: entry.is_holiday,
        }
    }
}

/// Parses a backend date, ignoring any time suffix.
///
/// # Errors
///
/// Returns an error if the first ten characters are not `YYYY-MM-DD`.
pub fn parse_wire_date(value: &str) -> Result<Date, DomainError> {
    parse_iso_date(value.get(..10).unwrap_or(value))
}

/// Parses an RFC 3339 timestamp, returning `None` for anything else.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339).ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

mod wire_date {
    use super::parse_wire_date;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let format = time::macros::format_description!("[year]-[month]-[day]");
        let text: String = date.format(&format).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text: String = String::deserialize(deserializer)?;
        parse_wire_date(&text).map_err(serde::de::Error::custom)
    }
}

mod optional_wire_date {
    use super::parse_wire_date;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::wire_date::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| parse_wire_date(&text).map_err(serde::de::Error::custom))
            .transpose()
    }
}
