/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use crate::config::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 优先使用 `RUST_LOG`；未设置时为 info，`verbose` 为真时为 debug。
/// 重复调用不会报错（测试中可能多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 简历批量分析模式");
    info!("📁 简历目录: {}", config.resume_folder);
    info!("📝 输出文件: {}", config.output_file);
    info!("📊 最大并发数: {}", config.max_concurrent_resumes);
    info!("{}", "=".repeat(60));
}

/// 记录简历加载信息
///
/// # 参数
/// - `total`: 简历总数
/// - `max_concurrent`: 最大并发数
pub fn log_resumes_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 份待处理的简历", total);
    info!("📋 将以每批 {} 份的方式处理", max_concurrent.max(1));
    info!("💡 每批完成后再开始下一批\n");
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `start`: 起始简历编号
/// - `end`: 结束简历编号
/// - `total`: 简历总数
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批简历: {}-{} / 共 {} 份", start, end, total);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
///
/// # 参数
/// - `failed`: 本批失败的文件名
pub fn log_batch_complete(batch_num: usize, success: usize, total: usize, failed: &[String]) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 批完成: 成功 {}/{}", batch_num, success, total);
    if let Some(summary) = failed_summary(failed) {
        warn!("{}", summary);
    }
    info!("{}", "─".repeat(60));
}

fn failed_summary(failed: &[String]) -> Option<String> {
    if failed.is_empty() {
        return None;
    }
    Some(format!("✗ 本批失败 {} 份: {}", failed.len(), failed.join(", ")))
}

/// 打印最终统计信息
pub fn print_final_stats(
    success: usize,
    failed: usize,
    total: usize,
    output_file: &str,
    failure_log_file: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n报表已保存至: {}", output_file);
    if failed > 0 {
        info!("失败清单: {}", failure_log_file);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("简历分析工具", 2), "简历...");
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn test_failed_summary_lists_file_names() {
        let failed = vec!["scan.pdf".to_string(), "broken.pdf".to_string()];
        assert_eq!(
            failed_summary(&failed).unwrap(),
            "✗ 本批失败 2 份: scan.pdf, broken.pdf"
        );
        assert_eq!(failed_summary(&[]), None);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
