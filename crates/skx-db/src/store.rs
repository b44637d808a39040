//! Store handle wrapping `SkxDb` with write serialization.
//!
//! All repo methods are implemented as `impl SkxStore` blocks in `repos/`.
//! The `Repository` trait impl in `repository.rs` delegates to them.

use tokio::sync::{Mutex, MutexGuard};

use crate::SkxDb;
use crate::error::DatabaseError;

/// libSQL-backed store.
///
/// Every mutation takes the write gate first. The database has a single
/// connection, so two interleaved multi-statement writes would otherwise
/// share one transaction. Reads never take the gate.
pub struct SkxStore {
    db: SkxDb,
    write_gate: Mutex<()>,
}

impl SkxStore {
    /// Open (and migrate) a local database file, or `":memory:"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Ok(Self::from_db(SkxDb::open_local(path).await?))
    }

    #[must_use]
    pub fn from_db(db: SkxDb) -> Self {
        Self {
            db,
            write_gate: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SkxDb {
        &self.db
    }

    /// Serialize a mutation against every other mutation on this store.
    pub(crate) async fn write_gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }
}
