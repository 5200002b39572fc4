use std::env;
use std::path::PathBuf;

/// 未设置 DATABASE_URL 时回退到内嵌 sqlite 文件
const DEFAULT_DATABASE_URL: &str = "sqlite://predictions.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MODEL_PATH: &str = "models/model_p3.json";
const DEFAULT_MODEL_URL: &str =
    "https://huggingface.co/futurisys/energy-model-p3/resolve/main/model_p3.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub model_path: PathBuf,
    pub model_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH)),
            model_url: env::var("MODEL_URL").unwrap_or_else(|_| DEFAULT_MODEL_URL.to_string()),
        }
    }
}
