// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named record as stored in `local_records`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub name: String,
    pub schema_version: i32,
    pub payload: String,
    pub updated_at: String,
}

/// The JSON body of the draft record.
///
/// Drafts are kept as raw values so that a single malformed draft can be
/// dropped without losing the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPayload {
    #[serde(default)]
    pub draft_periods: Vec<Value>,
}
