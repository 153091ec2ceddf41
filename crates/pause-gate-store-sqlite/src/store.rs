// crates/pause-gate-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Receipt Store
// Description: Durable ReceiptStore backed by SQLite WAL.
// Purpose: Persist sealed receipts with hash-verified, idempotent appends.
// Dependencies: pause-gate-core, rusqlite, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Receipts are stored as canonical JSON payloads in a single append-only
//! table keyed by `decision_id`. Appending the same receipt twice is a no-op;
//! appending a different receipt under an existing identifier is rejected.
//! Loads re-hash the stored payload and fail closed on mismatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use pause_gate_core::DecisionId;
use pause_gate_core::Receipt;
use pause_gate_core::hashing::DEFAULT_HASH_ALGORITHM;
use pause_gate_core::hashing::HashAlgorithm;
use pause_gate_core::hashing::hash_bytes;
use pause_gate_core::interfaces::AppendOutcome;
use pause_gate_core::interfaces::ReceiptStore;
use pause_gate_core::interfaces::StoreError;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the receipt store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum receipt payload size accepted by the store.
pub const MAX_RECEIPT_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteJournalMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteJournalMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` receipt store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteJournalMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Creates a configuration with defaults for the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteJournalMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` receipt store errors.
///
/// # Invariants
/// - Error messages avoid embedding full receipt payloads.
#[derive(Debug, Error, Clone)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store corruption or hash mismatch.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: found {found}, expected {expected}")]
    VersionMismatch {
        /// Version recorded in the store.
        found: i64,
        /// Version this crate requires.
        expected: i64,
    },
    /// Invalid store data or configuration.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// A conflicting receipt already exists for the decision identifier.
    #[error("conflicting receipt already stored for decision {0}")]
    Conflict(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) | SqliteStoreError::Invalid(message) => {
                Self::Store(message)
            }
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch { found, expected } => {
                Self::VersionMismatch { found, expected }
            }
            SqliteStoreError::Conflict(decision_id) => {
                Self::Invalid(DecisionId::new(decision_id))
            }
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed receipt store with WAL support.
///
/// # Invariants
/// - Receipt loads verify stored hashes before deserialization.
/// - `SQLite` connection access is serialized through a mutex.
/// - Rows are never updated or deleted; the table is an append log.
#[derive(Clone)]
pub struct SqliteReceiptStore {
    /// Shared connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteReceiptStore {
    /// Opens or creates the receipt store at the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path is invalid, the database
    /// cannot be opened, or the stored schema version does not match.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        if config.path.exists() && config.path.is_dir() {
            return Err(SqliteStoreError::Invalid(
                "store path must be a file, not a directory".to_string(),
            ));
        }
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|_| StoreError::Store("sqlite store mutex poisoned".to_string()))
    }
}

impl ReceiptStore for SqliteReceiptStore {
    fn append(&self, receipt: &Receipt) -> Result<AppendOutcome, StoreError> {
        let payload = serde_json::to_vec(receipt)
            .map_err(|err| StoreError::Store(format!("receipt serialization failed: {err}")))?;
        if payload.len() > MAX_RECEIPT_BYTES {
            return Err(StoreError::Store(format!(
                "receipt payload exceeds size limit: {} bytes (max {MAX_RECEIPT_BYTES})",
                payload.len()
            )));
        }
        let digest = hash_bytes(DEFAULT_HASH_ALGORITHM, &payload);
        let mut guard = self.lock()?;
        let tx = guard
            .transaction()
            .map_err(|err| StoreError::Store(err.to_string()))?;
        let existing: Option<String> = tx
            .query_row(
                "SELECT receipt_hash FROM receipts WHERE decision_id = ?1",
                params![receipt.decision_id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| StoreError::Store(err.to_string()))?;
        match existing {
            Some(stored_hash) if stored_hash == digest.value => Ok(AppendOutcome::Duplicate),
            Some(_) => Err(StoreError::Invalid(receipt.decision_id.clone())),
            None => {
                tx.execute(
                    "INSERT INTO receipts
                        (decision_id, receipt_json, receipt_hash, hash_algorithm, appended_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        receipt.decision_id.as_str(),
                        payload,
                        digest.value,
                        algorithm_label(digest.algorithm),
                        unix_seconds_now(),
                    ],
                )
                .map_err(|err| StoreError::Store(err.to_string()))?;
                tx.commit()
                    .map_err(|err| StoreError::Store(err.to_string()))?;
                Ok(AppendOutcome::Appended)
            }
        }
    }

    fn load(&self, decision_id: &DecisionId) -> Result<Option<Receipt>, StoreError> {
        let guard = self.lock()?;
        let row: Option<(Vec<u8>, String)> = guard
            .query_row(
                "SELECT receipt_json, receipt_hash FROM receipts WHERE decision_id = ?1",
                params![decision_id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|err| StoreError::Store(err.to_string()))?;
        let Some((payload, stored_hash)) = row else {
            return Ok(None);
        };
        let digest = hash_bytes(DEFAULT_HASH_ALGORITHM, &payload);
        if digest.value != stored_hash {
            return Err(StoreError::Corrupt(format!(
                "receipt hash mismatch for decision {decision_id}"
            )));
        }
        let receipt: Receipt = serde_json::from_slice(&payload).map_err(|err| {
            StoreError::Corrupt(format!(
                "receipt deserialization failed for decision {decision_id}: {err}"
            ))
        })?;
        Ok(Some(receipt))
    }

    fn list(&self) -> Result<Vec<DecisionId>, StoreError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare("SELECT decision_id FROM receipts ORDER BY decision_id")
            .map_err(|err| StoreError::Store(err.to_string()))?;
        let rows = statement
            .query_map(params![], |row| row.get::<_, String>(0))
            .map_err(|err| StoreError::Store(err.to_string()))?;
        let mut ids = Vec::new();
        for row in rows {
            let id = row.map_err(|err| StoreError::Store(err.to_string()))?;
            ids.push(DecisionId::new(id));
        }
        Ok(ids)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        let guard = self.lock()?;
        guard
            .query_row("SELECT 1", params![], |_| Ok(()))
            .map_err(|err| StoreError::Store(err.to_string()))
    }
}

// ============================================================================
// SECTION: Connection Helpers
// ============================================================================

/// Opens an `SQLite` connection with secure defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!(
            "PRAGMA journal_mode = {};",
            config.journal_mode.pragma_value()
        ))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!(
            "PRAGMA synchronous = {};",
            config.sync_mode.pragma_value()
        ))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection
        .transaction()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    match version {
        None => {
            tx.execute(
                "INSERT INTO store_meta (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS receipts (
                    decision_id TEXT NOT NULL PRIMARY KEY,
                    receipt_json BLOB NOT NULL,
                    receipt_hash TEXT NOT NULL,
                    hash_algorithm TEXT NOT NULL,
                    appended_at INTEGER NOT NULL
                );",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        Some(found) if found == SCHEMA_VERSION => {}
        Some(found) => {
            return Err(SqliteStoreError::VersionMismatch {
                found,
                expected: SCHEMA_VERSION,
            });
        }
    }
    tx.commit()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Returns the stored label for a hash algorithm.
const fn algorithm_label(algorithm: HashAlgorithm) -> &'static str {
    match algorithm {
        HashAlgorithm::Sha256 => "sha256",
    }
}

/// Returns the current unix time in seconds, saturating on clock skew.
fn unix_seconds_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
}
