// ==========================================
// IGU 回收碳排放评估 - 日志初始化
// ==========================================
// 工具: tracing + tracing-subscriber
// 级别: RUST_LOG, 未设置时为 info
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

fn env_filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// 终端文本日志
///
/// # 示例
/// ```no_run
/// use igu_recovery::logging;
/// logging::init();
/// ```
///
/// 只看路径计算: `RUST_LOG=igu_recovery::engine::scenarios=debug`
pub fn init() {
    fmt()
        .with_env_filter(env_filter_or("info"))
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// JSON 行日志 (批量运行归档)
pub fn init_json() {
    fmt()
        .json()
        .with_env_filter(env_filter_or("info"))
        .with_current_span(true)
        .init();
}

/// 测试日志, 重复调用安全
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
