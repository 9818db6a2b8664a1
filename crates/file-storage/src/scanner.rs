use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use ai_file_common::FileManagerError;
use ai_file_domain::{FileEntry, FolderEntry};
use rayon::prelude::*;

use crate::hash::fingerprint_or_sentinel;
use crate::size::aggregate_size;

/// 规范化路径（支持正斜杠、去除首尾空白）
fn normalize_path(path: &str) -> PathBuf {
    let s = path.trim();
    #[cfg(windows)]
    let s = s.replace('/', "\\");
    PathBuf::from(s)
}

/// 校验扫描根路径：空/相对路径在任何 I/O 之前拒绝，不存在的路径报 NotFound
pub fn validate_root(path: &str) -> Result<PathBuf, FileManagerError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(FileManagerError::InvalidArgument(
            "path is empty".to_string(),
        ));
    }
    let path_buf = normalize_path(trimmed);
    if !path_buf.is_absolute() {
        return Err(FileManagerError::InvalidArgument(format!(
            "path is not absolute: {}",
            trimmed
        )));
    }
    if !path_buf.exists() {
        return Err(FileManagerError::NotFound(trimmed.to_string()));
    }
    Ok(path_buf)
}

pub(crate) fn map_io(path: &Path, e: std::io::Error) -> FileManagerError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        FileManagerError::PermissionDenied(path.display().to_string())
    } else {
        FileManagerError::Io(e)
    }
}

pub(crate) fn modified_secs(metadata: &fs::Metadata) -> Option<u64> {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
}

/// 列出 path 的直接子文件夹。deep 控制每个子文件夹的聚合大小口径（仅直接
/// 文件 / 整棵子树）。单个子文件夹读取失败只跳过该文件夹，整体调用仍成功；
/// 只有根目录本身不可访问才算失败
pub fn list_folders(path: &str, deep: bool) -> Result<Vec<FolderEntry>, FileManagerError> {
    let root = validate_root(path)?;
    let entries = fs::read_dir(&root).map_err(|e| map_io(&root, e))?;

    let mut results = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let child = entry.path();
        if !child.is_dir() {
            continue;
        }
        let metadata = match fs::metadata(&child) {
            Ok(m) => m,
            Err(e) => {
                log::debug!("skip unreadable folder {}: {}", child.display(), e);
                continue;
            }
        };
        results.push(FolderEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            size: aggregate_size(&child, deep),
            modified: modified_secs(&metadata),
        });
    }
    Ok(results)
}

/// 列出文件（不含指纹）
pub fn list_files(path: &str, deep: bool) -> Result<Vec<FileEntry>, FileManagerError> {
    enumerate_files(path, deep, false)
}

/// 列出文件并为每个文件计算前缀指纹
pub fn file_metadata(path: &str, deep: bool) -> Result<Vec<FileEntry>, FileManagerError> {
    enumerate_files(path, deep, true)
}

fn enumerate_files(
    path: &str,
    deep: bool,
    include_hash: bool,
) -> Result<Vec<FileEntry>, FileManagerError> {
    let root = validate_root(path)?;
    let paths = walk_files(&root, deep, true)?;

    // 指纹计算开销大，先收集路径再并行生成条目（par_iter 保持输入顺序，
    // 线程池宽度同时限制了同时打开的文件句柄数）
    let entries = if include_hash {
        paths
            .par_iter()
            .filter_map(|p| entry_from_path(p, true))
            .collect()
    } else {
        paths
            .iter()
            .filter_map(|p| entry_from_path(p, false))
            .collect()
    };
    Ok(entries)
}

/// 广度优先收集 root 下的文件路径，显式工作队列，不递归。
/// deep 时将子目录入队；不可读的子目录跳过。strict_root 时根目录
/// 读取失败向上抛，否则整体按 best-effort 返回空集
pub(crate) fn walk_files(
    root: &Path,
    deep: bool,
    strict_root: bool,
) -> Result<Vec<PathBuf>, FileManagerError> {
    let mut files = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(root.to_path_buf());
    let mut at_root = true;

    while let Some(dir) = queue.pop_front() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                if at_root && strict_root {
                    return Err(map_io(&dir, e));
                }
                log::debug!("skip unreadable dir {}: {}", dir.display(), e);
                at_root = false;
                continue;
            }
        };
        at_root = false;

        for entry in entries.filter_map(|e| e.ok()) {
            let p = entry.path();
            // is_dir 跟随符号链接，自引用目录树会无限遍历（与原行为一致）
            if p.is_dir() {
                if deep {
                    queue.push_back(p);
                }
            } else if p.is_file() {
                files.push(p);
            }
        }
    }
    Ok(files)
}

fn entry_from_path(path: &Path, include_hash: bool) -> Option<FileEntry> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            log::debug!("skip unreadable file {}: {}", path.display(), e);
            return None;
        }
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let mut entry = FileEntry::new(name, metadata.len(), modified_secs(&metadata));
    if include_hash {
        match fingerprint_or_sentinel(path) {
            Ok(hash) => entry.hash = Some(hash),
            Err(sentinel) => entry.hash_error = Some(sentinel),
        }
    }
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    fn create_test_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        File::create(dir.path().join("a.txt"))
            .unwrap()
            .write_all(b"hello")
            .unwrap();
        File::create(dir.path().join("b.txt"))
            .unwrap()
            .write_all(b"world!")
            .unwrap();
        let sub = dir.path().join("subdir");
        fs::create_dir_all(&sub).unwrap();
        File::create(sub.join("c.txt"))
            .unwrap()
            .write_all(b"nested")
            .unwrap();
        dir
    }

    #[test]
    fn test_validate_root_empty() {
        let err = validate_root("   ").unwrap_err();
        assert!(matches!(err, FileManagerError::InvalidArgument(_)));
    }

    #[test]
    fn test_validate_root_relative() {
        let err = validate_root("some/relative/path").unwrap_err();
        assert!(matches!(err, FileManagerError::InvalidArgument(_)));
    }

    #[test]
    fn test_validate_root_missing() {
        #[cfg(windows)]
        let bad_path = "C:\\nonexistent_xyz_12345_folder";
        #[cfg(not(windows))]
        let bad_path = "/nonexistent_xyz_12345_folder";
        let err = validate_root(bad_path).unwrap_err();
        assert!(matches!(err, FileManagerError::NotFound(_)));
    }

    #[test]
    fn test_empty_folder_shallow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        assert!(list_files(&path, false).unwrap().is_empty());
        assert!(list_folders(&path, false).unwrap().is_empty());
    }

    #[test]
    fn test_shallow_lists_direct_children_only() {
        let dir = create_test_tree();
        let path = dir.path().to_string_lossy().to_string();
        let files = list_files(&path, false).unwrap();
        let mut names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        names.sort();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn test_deep_listing_is_superset_in_count() {
        let dir = create_test_tree();
        let path = dir.path().to_string_lossy().to_string();
        let shallow = list_files(&path, false).unwrap();
        let deep = list_files(&path, true).unwrap();
        assert!(deep.len() >= shallow.len());
        assert_eq!(deep.len(), 3);
        assert!(deep.iter().any(|f| f.name == "c.txt"));
    }

    #[test]
    fn test_list_folders_reports_aggregate_size() {
        let dir = create_test_tree();
        let path = dir.path().to_string_lossy().to_string();
        let folders = list_folders(&path, false).unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "subdir");
        assert_eq!(folders[0].size, 6); // "nested"
        assert!(folders[0].modified.is_some());
    }

    #[test]
    fn test_folder_size_rounding_rule() {
        // 10 + 20 + 30 字节，按两位小数 MB 口径表示
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("data");
        fs::create_dir_all(&sub).unwrap();
        for (name, len) in [("x.bin", 10), ("y.bin", 20), ("z.bin", 30)] {
            File::create(sub.join(name))
                .unwrap()
                .write_all(&vec![0u8; len])
                .unwrap();
        }
        let folders = list_folders(&dir.path().to_string_lossy(), false).unwrap();
        assert_eq!(folders[0].size, 60);
        assert_eq!(ai_file_domain::units::round_mb(folders[0].size), 0.0);
    }

    #[test]
    fn test_file_metadata_includes_fingerprint() {
        let dir = create_test_tree();
        let path = dir.path().to_string_lossy().to_string();
        let files = file_metadata(&path, true).unwrap();
        assert_eq!(files.len(), 3);
        for f in &files {
            assert!(f.hash.is_some(), "missing hash for {}", f.name);
            assert!(f.hash_error.is_none());
        }
    }
}
