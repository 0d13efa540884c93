//! 报告生成 - 编排层
//!
//! 每个分析命令对应一个函数：加载日志 → 提取 → 汇总 → 写出 CSV / SVG。
//! 输出目录不存在时自动创建。

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analysis::plot::{
    games_comparison, model_comparison, render_grouped_bars, render_heatmap, render_line_panels,
    save_svg, two_models_comparison,
};
use crate::analysis::{aggregate, analyze_log, games_present, write_csv, AggregateRow};
use crate::error::AppResult;
use crate::models::{load_all_logs, load_eval_log, EvalLog, GameType};

/// 图表中使用的模型名称：优先取日志中的 `eval.model`，否则用文件名
pub fn model_label(path: &Path, log: &EvalLog) -> String {
    if !log.eval.model.trim().is_empty() {
        return log.eval.model.clone();
    }
    file_stem(path)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn load_aggregated(log_path: &Path) -> AppResult<(EvalLog, Vec<AggregateRow>)> {
    info!("📄 正在分析: {}", log_path.display());
    let log = load_eval_log(log_path).await?;
    let rows = analyze_log(&log);
    info!("✓ 提取 {} 条有效记录", rows.len());
    let aggregated = aggregate(&rows);
    Ok((log, aggregated))
}

/// 目录中每个模型的汇总结果；同名模型以后加载的日志为准
async fn load_models(log_dir: &Path) -> AppResult<Vec<(String, Vec<AggregateRow>)>> {
    info!("📁 正在扫描评测日志: {}", log_dir.display());
    let logs = load_all_logs(log_dir).await?;
    info!("✓ 共加载 {} 个评测日志", logs.len());

    let mut models: BTreeMap<String, Vec<AggregateRow>> = BTreeMap::new();
    for (path, log) in &logs {
        let label = model_label(path, log);
        if models.contains_key(&label) {
            warn!("⚠️ 模型 {} 出现在多个日志中，使用 {}", label, path.display());
        }
        models.insert(label, aggregate(&analyze_log(log)));
    }

    Ok(models.into_iter().collect())
}

fn games_in(models: &[(String, Vec<AggregateRow>)]) -> Vec<GameType> {
    let all: Vec<AggregateRow> = models.iter().flat_map(|(_, rows)| rows.iter().cloned()).collect();
    games_present(&all)
}

/// `analyze`：单个日志 → CSV
pub async fn analyze_file(log_path: &Path, output_csv: &Path) -> AppResult<Vec<AggregateRow>> {
    let (_, aggregated) = load_aggregated(log_path).await?;
    write_csv(output_csv, &aggregated)?;
    info!("✅ 结果已写入: {}", output_csv.display());
    Ok(aggregated)
}

/// `analyze-dir`：目录中所有日志合并汇总 → CSV
pub async fn analyze_dir(log_dir: &Path, output_csv: &Path) -> AppResult<Vec<AggregateRow>> {
    let logs = load_all_logs(log_dir).await?;
    let rows: Vec<_> = logs.iter().flat_map(|(_, log)| analyze_log(log)).collect();
    info!("✓ {} 个日志共 {} 条有效记录", logs.len(), rows.len());

    let aggregated = aggregate(&rows);
    write_csv(output_csv, &aggregated)?;
    info!("✅ 结果已写入: {}", output_csv.display());
    Ok(aggregated)
}

/// `plot`：每个博弈一张柱状图，写入 `<output_root>/<日志文件名>/<game>.svg`
pub async fn plot_log(log_path: &Path, output_root: &Path) -> AppResult<Vec<PathBuf>> {
    let (_, aggregated) = load_aggregated(log_path).await?;
    let output_dir = output_root.join(file_stem(log_path));
    info!("📂 输出目录: {}", output_dir.display());

    let mut written = Vec::new();
    for game in games_present(&aggregated) {
        let Some(svg) = render_grouped_bars(&aggregated, game) else {
            continue;
        };
        let path = output_dir.join(format!("{}.svg", game.key()));
        save_svg(&path, &svg)?;
        info!("🖼️ 已保存: {}", path.display());
        written.push(path);
    }

    info!("✅ 共生成 {} 张图表", written.len());
    Ok(written)
}

/// `heatmap`：每个博弈一张热力图（模型 × 对手设定）
pub async fn heatmaps(log_dir: &Path, output_dir: &Path) -> AppResult<Vec<PathBuf>> {
    let models = load_models(log_dir).await?;

    let mut written = Vec::new();
    for game in games_in(&models) {
        let path = output_dir.join(format!("{}_heatmap.svg", game.key()));
        save_svg(&path, &render_heatmap(&models, game))?;
        info!("🖼️ 已保存: {}", path.display());
        written.push(path);
    }

    info!("✅ 共生成 {} 张热力图: {}", written.len(), output_dir.display());
    Ok(written)
}

/// `compare-models`：每个博弈一张多模型折线图
pub async fn compare_models(log_dir: &Path, output_dir: &Path) -> AppResult<Vec<PathBuf>> {
    let models = load_models(log_dir).await?;

    let mut written = Vec::new();
    for game in games_in(&models) {
        let chart = model_comparison(&models, game);
        let path = output_dir.join(format!("{}_model_comparison_scatter.svg", game.key()));
        save_svg(&path, &render_line_panels(&[chart], "Model"))?;
        info!("🖼️ 已保存: {}", path.display());
        written.push(path);
    }

    info!("✅ 共生成 {} 张模型对比图: {}", written.len(), output_dir.display());
    Ok(written)
}

/// `compare-games`：单个日志中各博弈的对比图
///
/// 没有可画的数据时返回 `None`
pub async fn compare_games(
    log_path: &Path,
    output_dir: &Path,
    excluded: &HashSet<GameType>,
) -> AppResult<Option<PathBuf>> {
    if !excluded.is_empty() {
        let names: Vec<&str> = excluded.iter().map(|g| g.key()).collect();
        info!("🚫 排除博弈: {}", names.join(", "));
    }

    let (_, aggregated) = load_aggregated(log_path).await?;
    let Some(panels) = games_comparison(&aggregated, excluded) else {
        warn!("⚠️ 日志中没有可用数据");
        return Ok(None);
    };

    let path = output_dir.join(format!("{}_games_comparison.svg", file_stem(log_path)));
    save_svg(&path, &render_line_panels(&panels, "Game"))?;
    info!("✅ 已保存博弈对比图: {}", path.display());
    Ok(Some(path))
}

/// `compare-two`：两个模型在所有博弈上的对比图
///
/// 任一日志没有数据时返回 `None`
pub async fn compare_two(first: &Path, second: &Path, output_dir: &Path) -> AppResult<Option<PathBuf>> {
    let (log1, agg1) = load_aggregated(first).await?;
    let (log2, agg2) = load_aggregated(second).await?;

    if agg1.is_empty() || agg2.is_empty() {
        warn!("⚠️ 至少一个日志中没有可用数据");
        return Ok(None);
    }

    let name1 = model_label(first, &log1);
    let name2 = model_label(second, &log2);
    let Some(chart) = two_models_comparison((name1.as_str(), agg1.as_slice()), (name2.as_str(), agg2.as_slice())) else {
        warn!("⚠️ 两个模型都没有 same_model 设定的数据");
        return Ok(None);
    };

    let path = output_dir.join(format!(
        "{}_vs_{}_comparison.svg",
        file_stem(first),
        file_stem(second)
    ));
    save_svg(&path, &render_line_panels(&[chart], "Game"))?;
    info!("✅ 已保存两模型对比图: {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::eval_log::{EvalResults, EvalSpec, LOG_VERSION};

    fn empty_log(model: &str) -> EvalLog {
        EvalLog {
            version: LOG_VERSION,
            eval: EvalSpec {
                task: "play-game".to_string(),
                task_id: "abc".to_string(),
                model: model.to_string(),
                grader_model: "openai/gpt-5-mini".to_string(),
                epochs: 1,
                dataset_samples: 0,
                created: "2025-10-03T12:00:00+00:00".to_string(),
            },
            samples: vec![],
            results: EvalResults::default(),
            error: None,
        }
    }

    #[test]
    fn test_model_label_prefers_eval_model() {
        let path = Path::new("logs/run-1.json");
        assert_eq!(model_label(path, &empty_log("openai/gpt-4o")), "openai/gpt-4o");
        assert_eq!(model_label(path, &empty_log("")), "run-1");
    }

    #[tokio::test]
    async fn test_analyze_file_rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.eval");
        std::fs::write(&path, "{}").unwrap();
        assert!(analyze_file(&path, &dir.path().join("out.csv")).await.is_err());
    }

    #[tokio::test]
    async fn test_heatmaps_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(heatmaps(&dir.path().join("nope"), dir.path()).await.is_err());
    }
}
