//! 日誌系統初始化
//!
//! 函式庫本身只透過 `tracing` 發出事件，由執行檔或測試決定是否安裝 subscriber

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日誌系統
///
/// # 環境變數
/// - RUST_LOG: 日誌級別過濾器（預設: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=plan_calc=trace
///
/// # 示例
/// ```no_run
/// prodplan::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// 初始化測試環境的日誌系統
///
/// 使用 debug 級別並寫入測試輸出；重複呼叫不會失敗
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
