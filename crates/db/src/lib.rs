//! SQLite persistence for the pantry service.
//!
//! Row models and request DTOs live in [`models`], one zero-sized repository
//! per table in [`repositories`], and [`catalog::SqliteCatalog`] adapts the
//! repositories to the feasibility flow in `pantry-core`.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

pub mod catalog;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Demo catalog applied by [`seed_demo_data_if_empty`].
const SEED_SQL: &str = include_str!("../../../db/seed.sql");

/// Create a connection pool from a database URL.
///
/// The database file (and its parent directory) is created when missing.
/// Foreign keys are enforced and the journal runs in WAL mode.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);
    ensure_parent_dir(&options)?;

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Run a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Load the demo catalog when the database holds no catalog data yet.
///
/// Returns `true` if the seed ran.
pub async fn seed_demo_data_if_empty(pool: &DbPool) -> Result<bool, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM recipes) \
              + (SELECT COUNT(*) FROM ingredients) \
              + (SELECT COUNT(*) FROM categories)",
    )
    .fetch_one(pool)
    .await?;

    if existing > 0 {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    sqlx::raw_sql(SEED_SQL).execute(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!("Demo catalog seeded");
    Ok(true)
}

/// Create the directory holding a file-backed SQLite database.
///
/// In-memory databases have a bare filename with no parent, so nothing is
/// created for them.
fn ensure_parent_dir(options: &SqliteConnectOptions) -> Result<(), sqlx::Error> {
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_dir_created_for_file_database() {
        let root = std::env::temp_dir().join(format!("pantry-db-{}", std::process::id()));
        let url = format!("sqlite://{}/nested/pantry.db", root.display());
        let options = SqliteConnectOptions::from_str(&url).unwrap();

        ensure_parent_dir(&options).unwrap();
        assert!(root.join("nested").is_dir());
        assert!(!root.join("nested/pantry.db").exists());

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn query_string_is_not_part_of_the_path() {
        let options = SqliteConnectOptions::from_str("sqlite:data/pantry.db?mode=rwc").unwrap();
        assert_eq!(options.get_filename(), std::path::Path::new("data/pantry.db"));
    }

    #[test]
    fn memory_database_needs_no_directory() {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        ensure_parent_dir(&options).unwrap();
    }

    #[tokio::test]
    async fn memory_pool_connects() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        health_check(&pool).await.unwrap();
    }
}
