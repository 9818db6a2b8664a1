use std::time::Duration;

use ai_file_common::{AppConfig, FileManagerError};
use ai_file_domain::{AnalysisDecision, FileEntry};
use async_trait::async_trait;

/// 远程分析服务端口。以能力注入的方式传给调度器，测试可换成脚本化替身
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// 提交一个批次的文件元数据，返回与提交顺序一一对应的决定列表。
    /// 按位置配对是远端契约，这里不做二次校验
    async fn analyze_batch(
        &self,
        files: &[FileEntry],
    ) -> Result<Vec<AnalysisDecision>, FileManagerError>;

    /// 单文件分析（远端保留的回退端点）
    async fn analyze_file(&self, file: &FileEntry)
        -> Result<AnalysisDecision, FileManagerError>;
}

/// 基于 HTTP 的远程分析客户端
pub struct HttpAnalysisProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisProvider {
    pub fn new(config: &AppConfig) -> Result<Self, FileManagerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FileManagerError::Config(format!("无法构建 HTTP 客户端: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.analysis_endpoint.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<B, T>(&self, route: &str, body: &B) -> Result<T, FileManagerError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, route);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                FileManagerError::RemoteFailure(format!("request to {} failed: {}", url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FileManagerError::RemoteFailure(format!(
                "{} returned {}: {}",
                url, status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            FileManagerError::RemoteFailure(format!("decode response from {}: {}", url, e))
        })
    }
}

#[async_trait]
impl AnalysisProvider for HttpAnalysisProvider {
    async fn analyze_batch(
        &self,
        files: &[FileEntry],
    ) -> Result<Vec<AnalysisDecision>, FileManagerError> {
        self.post_json("analyze-batch", files).await
    }

    async fn analyze_file(
        &self,
        file: &FileEntry,
    ) -> Result<AnalysisDecision, FileManagerError> {
        self.post_json("analyze-file", file).await
    }
}
