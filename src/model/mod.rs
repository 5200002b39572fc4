pub mod accessor;
pub mod bundle;

pub use accessor::{ArtifactSource, ModelAccessor, ModelSource};
pub use bundle::{ColumnKind, ColumnSpec, ModelBundle};

/// 模型侧错误：加载失败对请求致命、对进程不致命
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("model unavailable: {0}")]
    Unavailable(String),
    #[error("invalid features: {0}")]
    InvalidFeatures(String),
}
