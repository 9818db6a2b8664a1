use std::fs::File;
use std::io::Read;
use std::path::Path;

use ai_file_common::FileManagerError;
use md5::{Digest, Md5};

use crate::scanner::map_io;

/// 指纹只覆盖文件前 256 KiB。这是兼容性常量：只有前 256 KiB 相同的大文件
/// 会得到相同指纹，用于廉价的疑似重复筛查，不是全文件哈希
pub const HASH_SAMPLE_BYTES: usize = 256 * 1024;

/// 计算前缀指纹：MD5，小写十六进制。不足 256 KiB 的文件整体参与
pub fn prefix_fingerprint(path: &Path) -> Result<String, FileManagerError> {
    let mut file = File::open(path).map_err(|e| map_io(path, e))?;
    let mut buffer = vec![0u8; HASH_SAMPLE_BYTES];
    let mut filled = 0;
    loop {
        let n = file
            .read(&mut buffer[filled..])
            .map_err(|e| map_io(path, e))?;
        if n == 0 {
            break;
        }
        filled += n;
        if filled == HASH_SAMPLE_BYTES {
            break;
        }
    }

    let mut hasher = Md5::new();
    hasher.update(&buffer[..filled]);
    Ok(hex::encode(hasher.finalize()))
}

/// 扫描路径上的失败映射：权限拒绝给固定哨兵 "AccessDenied"，其它错误给
/// 错误描述。哨兵进入 FileEntry.hash_error，不与有效指纹混用
pub fn fingerprint_or_sentinel(path: &Path) -> Result<String, String> {
    match prefix_fingerprint(path) {
        Ok(hash) => Ok(hash),
        Err(FileManagerError::PermissionDenied(_)) => Err("AccessDenied".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        File::create(&path).unwrap().write_all(content).unwrap();
        path
    }

    #[test]
    fn test_known_digest_of_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "hello.txt", b"hello");
        // 短文件整体哈希，等于标准 MD5("hello")
        assert_eq!(
            prefix_fingerprint(&path).unwrap(),
            "5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[test]
    fn test_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.bin", &[7u8; 4096]);
        let first = prefix_fingerprint(&path).unwrap();
        let second = prefix_fingerprint(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_first_256k_matters() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = vec![0xABu8; 1024 * 1024];
        let mut b = a.clone();
        // 尾部不同、前 256 KiB 相同，指纹应当一致
        *a.last_mut().unwrap() = 0x01;
        *b.last_mut().unwrap() = 0x02;
        let pa = write_file(&dir, "a.bin", &a);
        let pb = write_file(&dir, "b.bin", &b);
        assert_eq!(
            prefix_fingerprint(&pa).unwrap(),
            prefix_fingerprint(&pb).unwrap()
        );

        // 前 256 KiB 内不同，指纹不同
        let mut c = a.clone();
        c[0] = 0xFF;
        let pc = write_file(&dir, "c.bin", &c);
        assert_ne!(
            prefix_fingerprint(&pa).unwrap(),
            prefix_fingerprint(&pc).unwrap()
        );
    }

    #[test]
    fn test_missing_file_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone.bin");
        let err = fingerprint_or_sentinel(&gone).unwrap_err();
        assert!(!err.is_empty());
    }
}
