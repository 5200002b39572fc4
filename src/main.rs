use anyhow::Context;
use energy_api::model::{ArtifactSource, ModelAccessor};
use energy_api::{api, storage, AppConfig, AppState};
use log::info;
use std::sync::Arc;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("energy_api", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .init();

    let config = AppConfig::from_env();

    let db = storage::establish_connection(&config.database_url)
        .await
        .context("database connection failed")?;

    // 模型懒加载：首个请求（或健康检查）触发
    let source = ArtifactSource::new(config.model_path.clone(), config.model_url.clone())?;
    let model = Arc::new(ModelAccessor::new(Box::new(source)));

    let state = AppState::new(Arc::new(db), model);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.bind_addr))?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
