/// 初始化日志（RUST_LOG 可覆盖，默认 info）。重复调用安全。
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
}
