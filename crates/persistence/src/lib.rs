// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local draft persistence for Shift Desk.
//!
//! Drafts survive restarts in a single named record, `shift-storage`,
//! holding only draft periods. Canonical periods are always rebuilt from
//! the backend and never written here.
//!
//! ## Storage
//!
//! Diesel over `SQLite`. Tests and ephemeral sessions use a shared
//! in-memory database; the CLI uses a file database in WAL mode.
//!
//! ## Schema versions
//!
//! The record carries a schema version. Loading a record written at an
//! older version migrates it and rewrites it at the current version. See
//! the `migration` module.

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

use diesel::SqliteConnection;
use shift_desk_domain::ShiftPeriod;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info, warn};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod migration;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use migration::{CURRENT_SCHEMA_VERSION, LEGACY_SCHEMA_VERSION};

/// The name of the record holding persisted drafts.
pub const STORAGE_NAME: &str = "shift-storage";

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Durable storage for draft periods.
pub trait DraftStore: Send {
    /// Loads persisted drafts, migrating older records.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read. Individual drafts that
    /// fail to decode are discarded, not reported.
    fn load(&mut self) -> Result<Vec<ShiftPeriod>, PersistenceError>;

    /// Replaces the persisted drafts.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    fn save(&mut self, drafts: &[ShiftPeriod]) -> Result<(), PersistenceError>;
}

/// `SQLite`-backed draft store.
pub struct SqliteDraftStore {
    pub(crate) conn: SqliteConnection,
}

impl std::fmt::Debug for SqliteDraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDraftStore").finish_non_exhaustive()
    }
}

impl SqliteDraftStore {
    /// Creates a draft store with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a draft store with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    fn write(&mut self, drafts: &[ShiftPeriod]) -> Result<(), PersistenceError> {
        let payload: String = migration::encode_payload(drafts)?;
        let updated_at: String = OffsetDateTime::now_utc().format(&Rfc3339)?;
        mutations::records::upsert_record(
            &mut self.conn,
            STORAGE_NAME,
            CURRENT_SCHEMA_VERSION,
            &payload,
            &updated_at,
        )
    }
}

impl DraftStore for SqliteDraftStore {
    fn load(&mut self) -> Result<Vec<ShiftPeriod>, PersistenceError> {
        let Some(record) = queries::records::get_record(&mut self.conn, STORAGE_NAME)? else {
            info!("No persisted drafts found");
            return Ok(Vec::new());
        };

        debug!(
            "Found record {} written at {}",
            record.name, record.updated_at
        );

        let migrated: migration::MigratedDrafts =
            migration::migrate_payload(record.schema_version, &record.payload)?;

        if migrated.needs_rewrite {
            if migrated.discarded > 0 {
                warn!(
                    "Discarded {} persisted drafts with invalid identifiers",
                    migrated.discarded
                );
            }
            info!(
                "Rewriting persisted drafts from schema version {} to {}",
                record.schema_version, CURRENT_SCHEMA_VERSION
            );
            self.write(&migrated.drafts)?;
        }

        info!("Loaded {} persisted drafts", migrated.drafts.len());
        Ok(migrated.drafts)
    }

    fn save(&mut self, drafts: &[ShiftPeriod]) -> Result<(), PersistenceError> {
        self.write(drafts)?;
        info!("Persisted {} drafts", drafts.len());
        Ok(())
    }
}
