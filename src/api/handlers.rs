use crate::app_state::AppState;
use crate::error::ApiError;
use crate::features::{normalize, EnergyRequest};
use crate::storage::repository::{DatasetDto, EnergyRepository, PredictionDto};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use log::info;
use serde::{Deserialize, Serialize};

const MAX_PAGE_SIZE: u64 = 500;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
    pub model_loaded: bool,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub prediction: f64,
    pub dataset_id: i32,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub total: u64,
    pub predictions: Vec<PredictionDto>,
}

#[derive(Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    50
}

/// 活性探针：顺带做一次模型加载，永不报错
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    match state.model.handle().await {
        Ok(_) => Json(HealthResponse {
            status: "ok",
            message: "API en ligne 🚀".to_string(),
            model_loaded: true,
        }),
        Err(e) => Json(HealthResponse {
            status: "degraded",
            message: e.to_string(),
            model_loaded: false,
        }),
    }
}

/// Normalize → predict → persist → respond. Schema failures return before
/// the model or the store is touched; the two inserts commit atomically.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<EnergyRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    request.validate().map_err(ApiError::Validation)?;

    let row = normalize(&request);
    let prediction = state.model.predict(&row).await?;
    let (dataset_id, prediction_id) =
        EnergyRepository::record(&state.db, &request, prediction).await?;

    info!(
        "prediction {:.2} recorded (dataset {}, prediction {})",
        prediction, dataset_id, prediction_id
    );
    Ok(Json(PredictResponse {
        prediction,
        dataset_id,
    }))
}

pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    if params.limit == 0 {
        return Err(ApiError::Validation("limit must be positive".to_string()));
    }
    let limit = params.limit.min(MAX_PAGE_SIZE);
    let (total, predictions) = EnergyRepository::history(&state.db, params.skip, limit).await?;
    Ok(Json(HistoryResponse { total, predictions }))
}

pub async fn get_dataset(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DatasetDto>, ApiError> {
    let dataset = EnergyRepository::get_dataset(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("dataset"))?;
    Ok(Json(dataset))
}

pub async fn get_prediction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PredictionDto>, ApiError> {
    let prediction = EnergyRepository::get_prediction(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("prediction"))?;
    Ok(Json(prediction))
}
