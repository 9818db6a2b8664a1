use serde::{Deserialize, Serialize};

/// 驱动器（卷）信息，容量均为字节
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveEntry {
    pub name: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
}
