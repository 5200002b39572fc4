use crate::storage::entity::{energy_dataset, energy_prediction};
use log::info;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Schema,
};
use std::time::Duration;

/// Connects to the store selected by the connection string and creates the
/// two tables if they are absent. Backend is sqlite or postgres depending on
/// the URL scheme.
pub async fn establish_connection(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.max_connections(10)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;
    let backend = db.get_database_backend();

    // 启用 WAL 模式（仅 sqlite）
    if backend == DatabaseBackend::Sqlite {
        db.execute(sea_orm::Statement::from_string(
            backend,
            "PRAGMA journal_mode=WAL;".to_string(),
        ))
        .await?;
    }

    // 创建表（如果不存在）
    let schema = Schema::new(backend);

    let stmt = backend.build(
        schema
            .create_table_from_entity(energy_dataset::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = backend.build(
        schema
            .create_table_from_entity(energy_prediction::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    info!("database connection established, tables initialized");

    Ok(db)
}
