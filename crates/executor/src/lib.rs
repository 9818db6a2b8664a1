pub mod delete;
pub mod r#move;

pub use delete::*;
pub use r#move::*;

use ai_file_common::FileManagerError;
use ai_file_domain::OperationResult;

/// 破坏性操作的统一边界：预期内的文件系统故障在这里折叠为
/// OperationResult，绝不越过调用边界向上抛
pub(crate) fn run_op(
    op: impl FnOnce() -> Result<String, FileManagerError>,
) -> OperationResult {
    match op() {
        Ok(message) => OperationResult::ok(message),
        Err(e) => OperationResult::failed(e.to_string()),
    }
}
