// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Versioned migration of the stored draft record.
//!
//! ## Versions
//!
//! - **1**: legacy scheme. Period ids were derived from dates
//!   (`2025-6-second`) and the payload may still be wrapped in a
//!   `{"state": {...}, "version": n}` envelope.
//! - **2**: current scheme. Every id is an identity token and the payload
//!   is `{"draftPeriods": [...]}`.
//!
//! Migration runs once, at load. Drafts that fail to decode at any version
//! are discarded and logged; they are never surfaced to callers.

use serde_json::Value;
use shift_desk_domain::ShiftPeriod;
use tracing::warn;

use crate::data_models::DraftPayload;
use crate::error::PersistenceError;

/// The legacy date-keyed schema version.
pub const LEGACY_SCHEMA_VERSION: i32 = 1;

/// The schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// The outcome of reading a stored draft record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedDrafts {
    /// Drafts that survived decoding.
    pub drafts: Vec<ShiftPeriod>,
    /// How many stored drafts were dropped.
    pub discarded: usize,
    /// Whether the record must be rewritten at the current version.
    pub needs_rewrite: bool,
}

/// Decodes a stored payload written at `schema_version`.
///
/// # Errors
///
/// Returns an error if the version is newer than this build understands.
/// A payload that is not JSON at all is treated as holding no drafts.
pub fn migrate_payload(
    schema_version: i32,
    payload: &str,
) -> Result<MigratedDrafts, PersistenceError> {
    if schema_version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedSchemaVersion {
            found: schema_version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    let raw: Vec<Value> = match serde_json::from_str::<Value>(payload) {
        Ok(value) => extract_draft_values(schema_version, value),
        Err(e) => {
            warn!("Stored draft record is not valid JSON, discarding: {}", e);
            return Ok(MigratedDrafts {
                drafts: Vec::new(),
                discarded: 0,
                needs_rewrite: true,
            });
        }
    };

    let total: usize = raw.len();
    let drafts: Vec<ShiftPeriod> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ShiftPeriod>(value) {
            Ok(period) => Some(period),
            Err(e) => {
                warn!("Discarding stored draft that failed to decode: {}", e);
                None
            }
        })
        .collect();
    let discarded: usize = total - drafts.len();

    Ok(MigratedDrafts {
        drafts,
        discarded,
        needs_rewrite: schema_version < CURRENT_SCHEMA_VERSION || discarded > 0,
    })
}

/// Serializes drafts into the current payload shape.
///
/// # Errors
///
/// Returns an error if a draft cannot be serialized.
pub fn encode_payload(drafts: &[ShiftPeriod]) -> Result<String, PersistenceError> {
    let draft_periods: Vec<Value> = drafts
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;
    Ok(serde_json::to_string(&DraftPayload { draft_periods })?)
}

fn extract_draft_values(schema_version: i32, value: Value) -> Vec<Value> {
    let body: Value = if schema_version <= LEGACY_SCHEMA_VERSION {
        match value {
            Value::Object(mut map) if map.contains_key("state") => {
                map.remove("state").unwrap_or(Value::Null)
            }
            other => other,
        }
    } else {
        value
    };

    match serde_json::from_value::<DraftPayload>(body) {
        Ok(payload) => payload.draft_periods,
        Err(e) => {
            warn!("Stored draft record has an unexpected shape, discarding: {}", e);
            Vec::new()
        }
    }
}
