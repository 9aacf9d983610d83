use std::sync::Arc;

use finitive_core::db::{self, DbPool, WriteHandle};
use tempfile::TempDir;

/// Creates a fresh on-disk database in a temp directory, runs migrations and
/// spawns the writer actor. The TempDir must be kept alive by the caller.
pub fn setup_db() -> (TempDir, Arc<DbPool>, WriteHandle) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_file = dir.path().join("app.db");
    let db_path = db::init(db_file.to_str().unwrap()).expect("init database");

    let pool = db::create_pool(&db_path).expect("create database pool");
    db::run_migrations(&pool).expect("run migrations");

    let writer = db::write_actor::spawn_writer((*pool).clone());
    (dir, pool, writer)
}
