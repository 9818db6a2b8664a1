use std::fs;
use std::path::{Path, PathBuf};

use ai_file_common::FileManagerError;
use ai_file_domain::OperationResult;

use crate::run_op;

enum Target {
    File,
    Folder,
}

impl Target {
    fn noun(&self) -> &'static str {
        match self {
            Target::File => "File",
            Target::Folder => "Folder",
        }
    }
}

/// 删除文件。permanent=false 走回收站（软删除）；平台没有回收站时
/// 无条件降级为永久删除
pub fn delete_file(path: &str, permanent: bool) -> OperationResult {
    delete_path(path, permanent, Target::File)
}

/// 删除文件夹（递归）。回收站策略与 delete_file 相同
pub fn delete_folder(path: &str, permanent: bool) -> OperationResult {
    delete_path(path, permanent, Target::Folder)
}

fn delete_path(path: &str, permanent: bool, target: Target) -> OperationResult {
    let p = PathBuf::from(path.trim());
    let exists = match target {
        Target::File => p.is_file(),
        Target::Folder => p.is_dir(),
    };
    if !exists {
        return OperationResult::failed(format!(
            "{} not found: {}",
            target.noun().to_lowercase(),
            path
        ));
    }

    run_op(|| {
        if permanent {
            remove_permanent(&p, &target)?;
            return Ok(format!("{} permanently deleted.", target.noun()));
        }

        #[cfg(any(windows, target_os = "macos", target_os = "linux"))]
        {
            trash::delete(&p)
                .map_err(|e| FileManagerError::Io(std::io::Error::other(e.to_string())))?;
            Ok(format!("{} moved to trash successfully.", target.noun()))
        }
        #[cfg(not(any(windows, target_os = "macos", target_os = "linux")))]
        {
            // 平台没有回收站：软删除静默降级为永久删除，消息如实说明
            remove_permanent(&p, &target)?;
            Ok(format!(
                "{} permanently deleted (trash is not supported on this platform).",
                target.noun()
            ))
        }
    })
}

fn remove_permanent(p: &Path, target: &Target) -> Result<(), FileManagerError> {
    match target {
        Target::File => fs::remove_file(p)?,
        Target::Folder => fs::remove_dir_all(p)?,
    }
    Ok(())
}
