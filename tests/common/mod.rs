use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use qreport::db::{DbPool, establish_connection_pool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// A temp-file SQLite database with all migrations applied. The backing
/// directory is removed when the value is dropped.
pub struct TestDb {
    pool: DbPool,
    _dir: tempfile::TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("failed to build pool");

        let mut conn = pool.get().expect("failed to get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("failed to run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
