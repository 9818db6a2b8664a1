use crate::FileManagerError;

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 远程分析服务地址（FastAPI 端点）
    pub analysis_endpoint: String,
    /// 单个批次请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 批次分析的默认批大小
    pub default_batch_size: usize,
    /// 同时在途的批次请求上限
    pub max_in_flight_batches: usize,
    /// HTTP 服务监听地址
    pub listen_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis_endpoint: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            default_batch_size: 10,
            max_in_flight_batches: 8,
            listen_addr: "127.0.0.1:5236".to_string(),
        }
    }
}

impl AppConfig {
    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, FileManagerError> {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("AI_FILE_ANALYSIS_ENDPOINT") {
            let v = v.trim().trim_end_matches('/').to_string();
            if v.is_empty() {
                return Err(FileManagerError::Config(
                    "AI_FILE_ANALYSIS_ENDPOINT is empty".to_string(),
                ));
            }
            config.analysis_endpoint = v;
        }
        if let Ok(v) = std::env::var("AI_FILE_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_env("AI_FILE_REQUEST_TIMEOUT_SECS", &v)?;
        }
        if let Ok(v) = std::env::var("AI_FILE_BATCH_SIZE") {
            config.default_batch_size = parse_env("AI_FILE_BATCH_SIZE", &v)?;
        }
        if let Ok(v) = std::env::var("AI_FILE_MAX_IN_FLIGHT") {
            config.max_in_flight_batches = parse_env("AI_FILE_MAX_IN_FLIGHT", &v)?;
        }
        if let Ok(v) = std::env::var("AI_FILE_LISTEN_ADDR") {
            config.listen_addr = v.trim().to_string();
        }

        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, FileManagerError> {
    value
        .trim()
        .parse()
        .map_err(|_| FileManagerError::Config(format!("{} 的值无效: {}", name, value)))
}
