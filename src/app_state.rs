use crate::model::ModelAccessor;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared per-request state: pooled connection plus the lazily loaded model.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub model: Arc<ModelAccessor>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, model: Arc<ModelAccessor>) -> Self {
        Self { db, model }
    }
}
