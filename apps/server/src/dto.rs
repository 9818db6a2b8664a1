//! 对外 DTO：容量换算为两位小数的 GB/MB，字段名与原接口保持 camelCase

use ai_file_domain::{units, DriveEntry, FileEntry, FolderEntry};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveInfoDto {
    pub drive_name: String,
    pub total_size_gb: f64,
    pub used_size_gb: f64,
    pub available_size_gb: f64,
}

impl From<&DriveEntry> for DriveInfoDto {
    fn from(drive: &DriveEntry) -> Self {
        Self {
            drive_name: drive.name.clone(),
            total_size_gb: units::round_gb(drive.total_bytes),
            used_size_gb: units::round_gb(drive.used_bytes),
            available_size_gb: units::round_gb(drive.available_bytes),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfoDto {
    pub name: String,
    pub size_mb: f64,
    /// Unix 时间戳（秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<u64>,
}

impl From<&FolderEntry> for FolderInfoDto {
    fn from(folder: &FolderEntry) -> Self {
        Self {
            name: folder.name.clone(),
            size_mb: units::round_mb(folder.size),
            last_modified: folder.modified,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfoDto {
    pub name: String,
    pub size_mb: f64,
    /// Unix 时间戳（秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_error: Option<String>,
}

impl From<&FileEntry> for FileInfoDto {
    fn from(file: &FileEntry) -> Self {
        Self {
            name: file.name.clone(),
            size_mb: units::round_mb(file.size),
            modified_date: file.modified,
            hash: file.hash.clone(),
            hash_error: file.hash_error.clone(),
        }
    }
}
