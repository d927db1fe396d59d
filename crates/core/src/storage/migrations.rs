//! Schema versioning
//!
//! Applied versions are recorded in `schema_migrations`. Each pending
//! migration runs in its own transaction together with its record.

use rusqlite::Connection;
use tracing::{info, instrument};

use crate::error::Result;

pub struct Migration {
    /// Sequential, starting at 1
    pub version: u32,
    pub description: &'static str,
    pub sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "Document table",
    sql: r#"
        -- One row per collection; body is the whole JSON document
        CREATE TABLE IF NOT EXISTS documents (
            key TEXT PRIMARY KEY,
            body TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#,
}];

/// Highest applied version, 0 for a fresh database
pub fn current_version(conn: &Connection) -> Result<u32> {
    let version = conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
        row.get::<_, Option<u32>>(0)
    })?;
    Ok(version.unwrap_or(0))
}

/// Bring the schema up to the latest version
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )?;

    let from = current_version(conn)?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > from) {
        info!(
            version = migration.version,
            description = migration.description,
            "Applying migration"
        );

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                migration.version,
                migration.description,
                chrono::Utc::now().to_rfc3339()
            ],
        )?;
        tx.commit()?;
    }

    let to = current_version(conn)?;
    if to > from {
        info!(from, to, "Database schema updated");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(conn: &Connection) -> u32 {
        conn.query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_fresh_database_reaches_latest() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(current_version(&conn).unwrap(), MIGRATIONS.len() as u32);
        conn.execute(
            "INSERT INTO documents (key, body, updated_at) VALUES ('k', '[]', 'now')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_rerun_applies_nothing() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(applied(&conn), MIGRATIONS.len() as u32);
    }

    #[test]
    fn test_versions_are_sequential() {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, i + 1, "{}", migration.description);
        }
    }
}
