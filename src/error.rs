use crate::model::ModelError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;

/// Request-level error taxonomy. Client errors carry their message through;
/// server errors are logged and mapped to a generic body so storage details
/// never leak.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            ApiError::Model(ModelError::InvalidFeatures(msg)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }
            ApiError::Model(ModelError::Unavailable(msg)) => {
                error!("model unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "model unavailable".to_string(),
                )
            }
            ApiError::Database(e) => {
                error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
