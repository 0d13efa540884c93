/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 debug / info 级别
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("superrational_agents={default_level},superrational={default_level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录评测启动信息
///
/// # 参数
/// - `model`: 被评测的模型
/// - `epochs`: 每个样本的轮数
/// - `max_connections`: 最大并发数
pub fn log_startup(model: &str, epochs: usize, max_connections: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 评测启动 - 超理性博弈测试");
    info!("🤖 模型: {}", model);
    info!("🔁 轮数: {} | 📊 最大并发数: {}", epochs, max_connections);
    info!("{}", "=".repeat(60));
}

/// 记录样本加载信息
pub fn log_samples_loaded(samples: usize, epochs: usize) {
    info!("✓ 生成 {} 个样本，共 {} 次模型调用", samples, samples * epochs);
}

/// 打印最终统计信息
///
/// # 参数
/// - `completed`: 成功评分的数量
/// - `total`: 总调用数量
/// - `accuracy`: 准确率
/// - `stderr`: 标准误
/// - `log_file_path`: 评测日志路径
pub fn print_final_stats(completed: usize, total: usize, accuracy: f64, stderr: f64, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 评测完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完成: {}/{}", completed, total);
    info!("🎯 accuracy: {:.3} | stderr: {:.3}", accuracy, stderr);
    info!("{}", "=".repeat(60));
    info!("\n评测日志已保存至: {}", log_file_path);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("abc", 5), "abc");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("合作与背叛", 2), "合作...");
    }
}
