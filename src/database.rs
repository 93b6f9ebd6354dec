use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

pub async fn setup_database(db_url: &str) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(db_url).await?;
    Migrator::up(&db, None).await?;
    info!("Database ready, migrations applied");

    Ok(db)
}

/// Fresh, migrated sqlite database that lives as long as the connection.
#[cfg(test)]
pub(crate) async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
    // Every pooled connection would otherwise see its own empty database.
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}
