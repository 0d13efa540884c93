//! # Superrational Agents
//!
//! 用博弈论困境测试大语言模型是否表现出"超理性"的评测工具
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 博弈、对手设定、出手顺序、样本与评测日志
//! - `build_dataset` - 生成 6 × 5 × 3 = 90 个样本
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个样本
//! - `LlmService` - 调用 OpenAI 兼容接口
//! - `ModelGrader` - 用评分模型判断 Platonia 回答
//! - `SuperrationalScorer` - 提取答案并评分
//! - `LogWriter` - 写评测日志能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个样本一轮"的完整处理流程
//! - `SampleCtx` - 上下文封装（sample_id + epoch）
//! - `SampleFlow` - 流程编排（generate → score → record）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/eval_runner` - 评测执行器，管理并发和多轮
//! - `orchestrator/reports` - 各分析命令的入口
//!
//! ### ⑤ 分析层（Analysis）
//! - `analysis/` - 日志提取、分组汇总、CSV 与 SVG 图表
//!
//! ## 模块结构

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{build_dataset, EvalLog, GameType, MoveOrderVariant, PlayersVariant, Sample};
pub use orchestrator::{run_eval, EvalOutcome, EvalRunner};
pub use services::ChatModel;
pub use workflow::{SampleCtx, SampleFlow};
