//! # skx-db
//!
//! libSQL storage backend for the skill-exchange engine.
//!
//! Holds all relational state: users and their skill sets, the skill
//! catalog, connections and chat rooms, reviews with per-skill evaluations,
//! session resolutions, and the token reward ledger. `SkxStore` implements
//! `skx_core::repository::Repository` on top of it.
//!
//! Uses the `libsql` crate (C `SQLite` fork). Idempotent find-or-create
//! operations are enforced by UNIQUE constraints in the schema, not by
//! read-then-write checks.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
mod repository;
pub mod store;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use store::SkxStore;

/// Low-level database handle: a libSQL database and its single connection.
pub struct SkxDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SkxDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let skx_db = Self { db, conn };
        skx_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(skx_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"con-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
