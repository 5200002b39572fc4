use crate::features::{FeatureValue, ModelInputRow};
use crate::model::ModelError;
use gbdt::decision_tree::Data;
use gbdt::gradient_boost::GBDT;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How one column of the model's tabular schema is encoded.
///
/// The trained ensemble consumes a positional float vector, so the bundle
/// carries the encoding tables alongside the trees; the service itself holds
/// no modeling knowledge.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical { levels: HashMap<String, u32> },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

/// 序列化模型工件：列顺序 + 类别编码 + GBDT 树
///
/// The predictor is order-sensitive, so `columns` is authoritative: rows are
/// encoded in exactly this order regardless of how the caller assembled them.
#[derive(Serialize, Deserialize)]
pub struct ModelBundle {
    pub columns: Vec<ColumnSpec>,
    pub model: GBDT,
}

impl ModelBundle {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Coerces a named row into the positional vector the ensemble expects.
    pub fn encode(&self, row: &ModelInputRow) -> Result<Vec<f32>, ModelError> {
        let mut features = Vec::with_capacity(self.columns.len());
        for col in &self.columns {
            let value = row.get(&col.name).ok_or_else(|| {
                ModelError::InvalidFeatures(format!("missing column {}", col.name))
            })?;
            features.push(Self::encode_value(col, value)?);
        }
        Ok(features)
    }

    fn encode_value(col: &ColumnSpec, value: &FeatureValue) -> Result<f32, ModelError> {
        // 缺省值统一编码为 0（与训练侧的填充策略一致）
        if matches!(value, FeatureValue::Null) {
            return Ok(0.0);
        }
        match &col.kind {
            ColumnKind::Numeric => value.as_number().map(|v| v as f32).ok_or_else(|| {
                ModelError::InvalidFeatures(format!("column {} expects a number", col.name))
            }),
            ColumnKind::Categorical { levels } => match value {
                FeatureValue::Text(s) => levels.get(s).map(|idx| *idx as f32).ok_or_else(|| {
                    ModelError::InvalidFeatures(format!(
                        "unknown level {:?} for column {}",
                        s, col.name
                    ))
                }),
                _ => Err(ModelError::InvalidFeatures(format!(
                    "column {} expects a categorical value",
                    col.name
                ))),
            },
        }
    }

    /// Single-row regression. The ensemble returns one value per input row.
    pub fn predict_row(&self, row: &ModelInputRow) -> Result<f64, ModelError> {
        let features = self.encode(row)?;
        let batch = vec![Data::new_test_data(features, None)];
        let predictions = self.model.predict(&batch);
        predictions
            .first()
            .map(|v| *v as f64)
            .ok_or_else(|| ModelError::Unavailable("model produced no output".to_string()))
    }
}
