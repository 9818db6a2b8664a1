use ai_file_domain::DriveEntry;
use sysinfo::Disks;

/// 列出就绪的驱动器。总容量为 0 的伪文件系统视为未就绪，过滤掉；
/// 同一挂载点只保留一条
pub fn list_drives() -> Vec<DriveEntry> {
    let disks = Disks::new_with_refreshed_list();
    let mut drives: Vec<DriveEntry> = disks
        .list()
        .iter()
        .filter(|d| d.total_space() > 0)
        .map(|d| {
            let total = d.total_space();
            let available = d.available_space();
            DriveEntry {
                name: d.mount_point().display().to_string(),
                total_bytes: total,
                used_bytes: total.saturating_sub(available),
                available_bytes: available,
            }
        })
        .collect();
    drives.sort_by(|a, b| a.name.cmp(&b.name));
    drives.dedup_by(|a, b| a.name == b.name);
    drives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_invariants() {
        for drive in list_drives() {
            assert!(!drive.name.is_empty());
            assert!(drive.total_bytes > 0);
            assert!(
                drive.used_bytes <= drive.total_bytes,
                "used must not exceed total for {}",
                drive.name
            );
        }
    }
}
