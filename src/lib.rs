pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod storage;

pub use app_state::AppState;
pub use config::AppConfig;
pub use error::ApiError;
