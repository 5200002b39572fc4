use crate::features::ModelInputRow;
use crate::model::{ModelBundle, ModelError};
use async_trait::async_trait;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the serialized model bundle comes from.
#[async_trait]
pub trait ModelSource: Send + Sync {
    async fn acquire(&self) -> Result<ModelBundle, ModelError>;
}

/// 本地优先，缺失时从固定远端 URL 拉取并落盘
pub struct ArtifactSource {
    path: PathBuf,
    url: String,
    client: reqwest::Client,
}

impl ArtifactSource {
    pub fn new(path: PathBuf, url: String) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| ModelError::Unavailable(format!("http client init failed: {}", e)))?;
        Ok(Self { path, url, client })
    }

    async fn download(&self) -> Result<Vec<u8>, ModelError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                ModelError::Unavailable(format!("artifact fetch from {} failed: {}", self.url, e))
            })?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ModelError::Unavailable(format!("artifact body read failed: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ModelSource for ArtifactSource {
    async fn acquire(&self) -> Result<ModelBundle, ModelError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "model artifact missing at {}, fetching {}",
                    self.path.display(),
                    self.url
                );
                let bytes = self.download().await?;
                // 落盘失败不致命：本次仍用内存中的字节加载
                if let Some(parent) = self.path.parent() {
                    let _ = tokio::fs::create_dir_all(parent).await;
                }
                if let Err(e) = tokio::fs::write(&self.path, &bytes).await {
                    warn!("could not cache artifact at {}: {}", self.path.display(), e);
                }
                bytes
            }
            Err(e) => {
                return Err(ModelError::Unavailable(format!(
                    "cannot read model artifact {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        ModelBundle::from_slice(&bytes).map_err(|e| {
            ModelError::Unavailable(format!(
                "corrupt model artifact {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Process-wide model handle.
///
/// `OnceCell` gives the double-checked-lock behavior the service needs:
/// concurrent first requests race into a single `acquire`, every later call
/// reads the cached handle without locking. A failed load leaves the cell
/// empty so the next request retries.
pub struct ModelAccessor {
    source: Box<dyn ModelSource>,
    cell: OnceCell<Arc<ModelBundle>>,
}

impl ModelAccessor {
    pub fn new(source: Box<dyn ModelSource>) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    pub async fn handle(&self) -> Result<Arc<ModelBundle>, ModelError> {
        let bundle = self
            .cell
            .get_or_try_init(|| async {
                let bundle = self.source.acquire().await?;
                info!("model bundle loaded ({} columns)", bundle.columns.len());
                Ok::<_, ModelError>(Arc::new(bundle))
            })
            .await?;
        Ok(bundle.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub async fn predict(&self, row: &ModelInputRow) -> Result<f64, ModelError> {
        let bundle = self.handle().await?;
        bundle.predict_row(row)
    }
}
