// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local record mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::local_records;
use crate::error::PersistenceError;

/// Writes a record, replacing any existing record with the same name.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_record(
    conn: &mut SqliteConnection,
    name: &str,
    schema_version: i32,
    payload: &str,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    debug!(
        "Writing local record: {} (schema version {})",
        name, schema_version
    );

    diesel::replace_into(local_records::table)
        .values((
            local_records::name.eq(name),
            local_records::schema_version.eq(schema_version),
            local_records::payload.eq(payload),
            local_records::updated_at.eq(updated_at),
        ))
        .execute(conn)?;

    Ok(())
}
