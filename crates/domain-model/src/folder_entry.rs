use serde::{Deserialize, Serialize};

/// 文件夹条目。size 为内容聚合大小（字节），遇到无法读取的文件时可能偏小；
/// modified 是文件夹自身的修改时间，不是内容的
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderEntry {
    pub name: String,
    pub size: u64,
    /// Unix 时间戳（秒），最近修改时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<u64>,
}
