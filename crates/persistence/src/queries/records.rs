// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local record queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::StoredRecord;
use crate::diesel_schema::local_records;
use crate::error::PersistenceError;

/// Diesel Queryable struct for local record rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = local_records)]
struct LocalRecordRow {
    name: String,
    schema_version: i32,
    payload: String,
    updated_at: String,
}

/// Retrieves a record by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no record with that name exists.
pub fn get_record(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<StoredRecord>, PersistenceError> {
    debug!("Looking up local record: {}", name);

    let row: Option<LocalRecordRow> = local_records::table
        .filter(local_records::name.eq(name))
        .select(LocalRecordRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|r| StoredRecord {
        name: r.name,
        schema_version: r.schema_version,
        payload: r.payload,
        updated_at: r.updated_at,
    }))
}
