use serde::{Deserialize, Serialize};

/// 远程分析给出的单文件处置决定。action 由远端定义（如 delete/keep/review）；
/// 批次整体失败时以 action = "info" 的合成决定代替该批次的逐文件结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDecision {
    pub action: String,
    pub reason: String,
}

impl AnalysisDecision {
    /// 批次失败的合成决定，ordinal 为 1 起始的批次序号
    pub fn batch_failure(ordinal: usize, reason: impl std::fmt::Display) -> Self {
        Self {
            action: "info".to_string(),
            reason: format!("Batch {} failed: {}", ordinal, reason),
        }
    }
}
