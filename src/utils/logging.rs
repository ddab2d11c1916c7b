//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::Result;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::workflow::SubmissionResult;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；否则详细模式用 debug，默认 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n答案键提交日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `server`: 提交地址
/// - `exam_types`: 试卷类型数量（原始文本）
pub fn log_startup(server: &str, exam_types: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 答案键提交");
    info!("🌐 服务器: {}", server);
    info!("📋 试卷类型数量: {}", exam_types);
    info!("{}", "=".repeat(60));
}

/// 记录最终结果
///
/// # 参数
/// - `result`: 提交结果
/// - `log_file_path`: 日志文件路径
pub fn log_outcome(result: &SubmissionResult, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    match result {
        SubmissionResult::Downloaded(path) => info!("✅ 结果文件: {}", path.display()),
        SubmissionResult::ServerRejected(text) => {
            info!("❌ 服务器拒绝: {}", truncate_text(text, 120))
        }
        SubmissionResult::Unreachable => info!("❌ 无法连接服务器"),
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 追加一行到日志文件
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    use std::io::Write;

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        line
    )?;
    Ok(())
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
