//! 对外 DTO 使用的容量换算：MB/GB，保留两位小数

const MB: f64 = 1024.0 * 1024.0;
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn round_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / MB)
}

pub fn round_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / GB)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
