use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;

/// Open the metadata store pool and sync the `integrations` table.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("integrations_server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}
