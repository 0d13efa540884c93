use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use superrational_agents::orchestrator::{self, EvalRunner};
use superrational_agents::utils::logging;
use superrational_agents::{Config, GameType};

#[derive(Parser)]
#[command(name = "superrational")]
#[command(about = "测试大语言模型在博弈困境中是否表现出超理性")]
struct Cli {
    /// 显示详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行评测并写出评测日志
    Eval {
        /// 被评测的模型（provider/model）
        #[arg(long)]
        model: Option<String>,
        /// Platonia 博弈的评分模型
        #[arg(long)]
        grader_model: Option<String>,
        #[arg(long)]
        epochs: Option<usize>,
        /// 只评测前 N 个样本
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        max_connections: Option<usize>,
        #[arg(long)]
        log_dir: Option<String>,
    },
    /// 分析单个评测日志，输出 CSV
    Analyze {
        log_file: PathBuf,
        #[arg(default_value = "results.csv")]
        output: PathBuf,
    },
    /// 合并分析目录中的所有评测日志，输出 CSV
    AnalyzeDir {
        log_dir: PathBuf,
        #[arg(default_value = "results.csv")]
        output: PathBuf,
    },
    /// 为单个评测日志的每个博弈画柱状图
    Plot {
        log_file: PathBuf,
        #[arg(long, default_value = "plots")]
        output: PathBuf,
    },
    /// 多模型热力图
    Heatmap {
        log_dir: PathBuf,
        #[arg(default_value = "heatmaps")]
        output_dir: PathBuf,
    },
    /// 多模型折线对比图
    CompareModels {
        log_dir: PathBuf,
        /// 默认为 model_comparison_scatter/<log_dir>
        output_dir: Option<PathBuf>,
    },
    /// 单个模型在各博弈上的对比图
    CompareGames {
        log_file: PathBuf,
        #[arg(short, long, default_value = "game_comparison_plots")]
        output: PathBuf,
        /// 要排除的博弈（game_key）
        #[arg(long, num_args = 0..)]
        exclude: Vec<GameType>,
    },
    /// 两个模型在各博弈上的对比图
    CompareTwo {
        log_file1: PathBuf,
        log_file2: PathBuf,
        #[arg(short, long, default_value = "two_models_comparison_plots")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();

    // 初始化日志
    logging::init(cli.verbose || config.verbose_logging);

    match cli.command {
        Commands::Eval {
            model,
            grader_model,
            epochs,
            limit,
            max_connections,
            log_dir,
        } => {
            // 命令行参数优先于环境变量
            if let Some(model) = model {
                config.eval_model = model;
            }
            if let Some(grader_model) = grader_model {
                config.grader_model = grader_model;
            }
            if let Some(epochs) = epochs {
                config.epochs = epochs;
            }
            if limit.is_some() {
                config.limit = limit;
            }
            if let Some(max_connections) = max_connections {
                config.max_connections = max_connections;
            }
            if let Some(log_dir) = log_dir {
                config.log_dir = log_dir;
            }
            config.verbose_logging |= cli.verbose;

            let model_name = config.eval_model.clone();
            EvalRunner::from_config(config)
                .with_context(|| format!("无法初始化模型 {}", model_name))?
                .run()
                .await
                .context("评测失败")?;
        }
        Commands::Analyze { log_file, output } => {
            orchestrator::analyze_file(&log_file, &output)
                .await
                .with_context(|| format!("分析失败: {}", log_file.display()))?;
        }
        Commands::AnalyzeDir { log_dir, output } => {
            orchestrator::analyze_dir(&log_dir, &output)
                .await
                .with_context(|| format!("分析失败: {}", log_dir.display()))?;
        }
        Commands::Plot { log_file, output } => {
            orchestrator::plot_log(&log_file, &output)
                .await
                .with_context(|| format!("画图失败: {}", log_file.display()))?;
        }
        Commands::Heatmap { log_dir, output_dir } => {
            orchestrator::heatmaps(&log_dir, &output_dir)
                .await
                .with_context(|| format!("画热力图失败: {}", log_dir.display()))?;
        }
        Commands::CompareModels { log_dir, output_dir } => {
            let output_dir =
                output_dir.unwrap_or_else(|| PathBuf::from("model_comparison_scatter").join(&log_dir));
            orchestrator::compare_models(&log_dir, &output_dir)
                .await
                .with_context(|| format!("画模型对比图失败: {}", log_dir.display()))?;
        }
        Commands::CompareGames {
            log_file,
            output,
            exclude,
        } => {
            let excluded: HashSet<GameType> = exclude.into_iter().collect();
            orchestrator::compare_games(&log_file, &output, &excluded)
                .await
                .with_context(|| format!("画博弈对比图失败: {}", log_file.display()))?;
        }
        Commands::CompareTwo {
            log_file1,
            log_file2,
            output,
        } => {
            orchestrator::compare_two(&log_file1, &log_file2, &output)
                .await
                .context("画两模型对比图失败")?;
        }
    }

    Ok(())
}
