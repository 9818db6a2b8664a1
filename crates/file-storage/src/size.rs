use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::scanner::walk_files;

/// 聚合文件夹内容大小（字节）。shallow 逐个顺序累加直接子文件；deep 先枚举
/// 整棵子树的文件，再并行读取长度、原子累加。策略由 deep 标志决定，不根据
/// 文件数自适应。单个文件读取失败一律丢弃该文件（结果是真实大小的下界，
/// 调用方拿不到降级信号）；没有可读文件时返回 0
pub fn aggregate_size(path: &Path, deep: bool) -> u64 {
    if deep {
        deep_size_parallel(path)
    } else {
        shallow_size_sequential(path)
    }
}

fn shallow_size_sequential(path: &Path) -> u64 {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(_) => return 0,
    };
    let mut total = 0u64;
    for entry in entries.filter_map(|e| e.ok()) {
        if let Ok(metadata) = fs::metadata(entry.path()) {
            if metadata.is_file() {
                total += metadata.len();
            }
        }
    }
    total
}

fn deep_size_parallel(path: &Path) -> u64 {
    let files = walk_files(path, true, false).unwrap_or_default();
    let total = AtomicU64::new(0);
    files.par_iter().for_each(|p| {
        if let Ok(metadata) = fs::metadata(p) {
            if metadata.is_file() {
                total.fetch_add(metadata.len(), Ordering::Relaxed);
            }
        }
    });
    total.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    fn create_sized_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        File::create(dir.path().join("a.bin"))
            .unwrap()
            .write_all(&[1u8; 100])
            .unwrap();
        File::create(dir.path().join("b.bin"))
            .unwrap()
            .write_all(&[2u8; 200])
            .unwrap();
        let sub = dir.path().join("inner");
        fs::create_dir_all(&sub).unwrap();
        File::create(sub.join("c.bin"))
            .unwrap()
            .write_all(&[3u8; 300])
            .unwrap();
        dir
    }

    #[test]
    fn test_shallow_excludes_subtree() {
        let dir = create_sized_tree();
        assert_eq!(aggregate_size(dir.path(), false), 300);
    }

    #[test]
    fn test_deep_includes_subtree() {
        let dir = create_sized_tree();
        assert_eq!(aggregate_size(dir.path(), true), 600);
    }

    #[test]
    fn test_deep_parallel_is_idempotent() {
        let dir = create_sized_tree();
        let first = aggregate_size(dir.path(), true);
        let second = aggregate_size(dir.path(), true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_folder_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(aggregate_size(dir.path(), false), 0);
        assert_eq!(aggregate_size(dir.path(), true), 0);
    }

    #[test]
    fn test_missing_folder_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");
        assert_eq!(aggregate_size(&gone, false), 0);
        assert_eq!(aggregate_size(&gone, true), 0);
    }
}
