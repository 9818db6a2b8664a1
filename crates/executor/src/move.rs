use std::fs;
use std::path::{Path, PathBuf};

use ai_file_common::FileManagerError;
use ai_file_domain::OperationResult;

use crate::run_op;

/// 把 source 文件移动到 destination 目录下，保持原文件名。目标位置已有
/// 同名条目时先无条件删除再移动。这是破坏性覆盖，没有合并、改名或确认
pub fn move_file(source: &str, destination: &str) -> OperationResult {
    let src = PathBuf::from(source.trim());
    if !src.is_file() {
        return OperationResult::failed(format!("file not found: {}", source));
    }

    run_op(|| {
        let dest = dest_path(&src, destination)?;
        remove_existing(&dest)?;
        if fs::rename(&src, &dest).is_err() {
            // 跨卷移动时 rename 不可用，退化为复制后删除（非原子）
            fs::copy(&src, &dest)?;
            fs::remove_file(&src)?;
        }
        Ok("File moved successfully.".to_string())
    })
}

/// 移动文件夹，覆盖语义与 move_file 相同
pub fn move_folder(source: &str, destination: &str) -> OperationResult {
    let src = PathBuf::from(source.trim());
    if !src.is_dir() {
        return OperationResult::failed(format!("folder not found: {}", source));
    }

    run_op(|| {
        let dest = dest_path(&src, destination)?;
        remove_existing(&dest)?;
        if fs::rename(&src, &dest).is_err() {
            copy_dir_recursive(&src, &dest)?;
            fs::remove_dir_all(&src)?;
        }
        Ok("Folder moved successfully.".to_string())
    })
}

fn dest_path(src: &Path, destination: &str) -> Result<PathBuf, FileManagerError> {
    let name = src.file_name().ok_or_else(|| {
        FileManagerError::InvalidArgument(format!("source has no file name: {}", src.display()))
    })?;
    Ok(PathBuf::from(destination.trim()).join(name))
}

fn remove_existing(dest: &Path) -> Result<(), FileManagerError> {
    if dest.is_dir() {
        fs::remove_dir_all(dest)?;
    } else if dest.exists() {
        fs::remove_file(dest)?;
    }
    Ok(())
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<(), FileManagerError> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if from.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}
