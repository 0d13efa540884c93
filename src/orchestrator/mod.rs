//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层是命令行各子命令的落脚点，负责资源创建、并发调度和结果输出。
//!
//! ## 模块划分
//!
//! ### `eval_runner` - 评测执行器
//! - 生成数据集（博弈 × 对手设定 × 出手顺序）
//! - 控制并发数量（Semaphore）
//! - 每个样本重复多轮，委托 `SampleFlow` 处理单次调用
//! - 写出评测日志并输出统计信息
//!
//! ### `reports` - 报告生成
//! - 加载一个或多个评测日志
//! - 汇总后写出 CSV 或 SVG 图表
//!
//! ## 层次关系
//!
//! ```text
//! eval_runner (处理 Vec<Sample> × epochs)
//!     ↓
//! workflow::SampleFlow (处理单个 Sample)
//!     ↓
//! services (能力层：llm / answer / grader / scorer / log_writer)
//!
//! reports (处理 EvalLog)
//!     ↓
//! analysis (extract / aggregate / csv / plot)
//! ```

pub mod eval_runner;
pub mod reports;

// 重新导出主要类型
pub use eval_runner::{run_eval, EvalOutcome, EvalRunner, TASK_NAME};
pub use reports::{
    analyze_dir, analyze_file, compare_games, compare_two, compare_models, heatmaps, model_label,
    plot_log,
};
