use serde::{Deserialize, Serialize};

/// 文件条目。hash 与 hash_error 互斥：指纹计算成功填 hash，
/// 失败时 hash 留空、hash_error 记录原因（如 "AccessDenied"）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    /// Unix 时间戳（秒），最近修改时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<u64>,
    /// 前 256 KiB 内容指纹（小写十六进制）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_error: Option<String>,
}

impl FileEntry {
    pub fn new(name: String, size: u64, modified: Option<u64>) -> Self {
        Self {
            name,
            size,
            modified,
            hash: None,
            hash_error: None,
        }
    }
}
