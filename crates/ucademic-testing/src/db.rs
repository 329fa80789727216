//! In-memory SQLite for repository and HTTP tests.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

/// Connect to a fresh in-memory database.
///
/// The pool is capped at one connection: every pooled connection would
/// otherwise open its own empty database.
pub async fn memory_database() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options).await.unwrap()
}

/// Create the table for `entity` from its definition. Parents first:
/// foreign keys are enforced.
pub async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) {
    let backend = db.get_database_backend();
    let statement = Schema::new(backend).create_table_from_entity(entity);
    db.execute(backend.build(&statement)).await.unwrap();
}
