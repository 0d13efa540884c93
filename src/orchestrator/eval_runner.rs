//! 评测执行器 - 编排层
//!
//! ## 职责
//!
//! 本模块是评测命令的入口，负责整个数据集的调度和资源管理。
//!
//! ## 核心功能
//!
//! 1. **数据集生成**：博弈 × 对手设定 × 出手顺序（可用 `limit` 截断）
//! 2. **并发控制**：使用 Semaphore 限制同时进行的模型调用数量
//! 3. **多轮评测**：每个样本重复 `epochs` 轮
//! 4. **汇总统计**：计算 accuracy / stderr 并写出评测日志

use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, warn};

use crate::config::Config;
use crate::error::{AppResult, ConfigError};
use crate::models::eval_log::{EvalLog, EvalResults, EvalSpec, SampleRecord, LOG_VERSION};
use crate::models::sample::{build_dataset, Sample};
use crate::services::{compute_metrics, ChatModel, LlmService, LogWriter, ModelGrader, SuperrationalScorer};
use crate::utils::logging;
use crate::workflow::{SampleCtx, SampleFlow};

/// 任务名称
pub const TASK_NAME: &str = "play-game";

/// 评测结果
#[derive(Debug)]
pub struct EvalOutcome {
    pub log: EvalLog,
    pub log_path: PathBuf,
}

/// 评测执行器
pub struct EvalRunner {
    config: Config,
    model: Arc<dyn ChatModel>,
    grader: Arc<dyn ChatModel>,
}

impl EvalRunner {
    /// 按配置创建真实的模型客户端
    pub fn from_config(config: Config) -> AppResult<Self> {
        let model: Arc<dyn ChatModel> = Arc::new(LlmService::new(&config.eval_model, &config)?);
        let grader: Arc<dyn ChatModel> = Arc::new(LlmService::new(&config.grader_model, &config)?);
        Ok(Self::new(config, model, grader))
    }

    pub fn new(config: Config, model: Arc<dyn ChatModel>, grader: Arc<dyn ChatModel>) -> Self {
        Self {
            config,
            model,
            grader,
        }
    }

    /// 运行评测并写出日志
    pub async fn run(&self) -> AppResult<EvalOutcome> {
        if self.config.epochs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "epochs".to_string(),
                reason: "必须大于 0".to_string(),
            }
            .into());
        }
        if self.config.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_connections".to_string(),
                reason: "必须大于 0".to_string(),
            }
            .into());
        }

        logging::log_startup(
            self.model.name(),
            self.config.epochs,
            self.config.max_connections,
        );

        let mut dataset = build_dataset();
        if let Some(limit) = self.config.limit {
            dataset.truncate(limit);
        }
        logging::log_samples_loaded(dataset.len(), self.config.epochs);

        let created = chrono::Local::now();
        let records = self.run_all(dataset.clone()).await;

        let scores: Vec<_> = records
            .iter()
            .filter_map(|r| r.superrational_score().map(|s| (r.id, s.value)))
            .collect();
        let metrics = compute_metrics(&scores);
        let run_error = run_error(&records, scores.len());

        let log = EvalLog {
            version: LOG_VERSION,
            eval: EvalSpec {
                task: TASK_NAME.to_string(),
                task_id: task_id(&created),
                model: self.model.name().to_string(),
                grader_model: self.grader.name().to_string(),
                epochs: self.config.epochs,
                dataset_samples: dataset.len(),
                created: created.to_rfc3339_opts(chrono::SecondsFormat::Secs, false),
            },
            results: EvalResults {
                total_samples: records.len(),
                completed_samples: scores.len(),
                accuracy: metrics.accuracy,
                stderr: metrics.stderr,
            },
            samples: records,
            error: run_error,
        };

        let writer = LogWriter::new(&self.config.log_dir);
        let log_path = writer.write(&log).await?;

        if let Some(e) = &log.error {
            error!("❌ 评测失败: {}", e);
        } else if log.results.completed_samples < log.results.total_samples {
            warn!(
                "⚠️ {} 条记录未完成评分",
                log.results.total_samples - log.results.completed_samples
            );
        }

        logging::print_final_stats(
            log.results.completed_samples,
            log.results.total_samples,
            metrics.accuracy,
            metrics.stderr,
            &log_path.display().to_string(),
        );

        Ok(EvalOutcome { log, log_path })
    }

    /// 并发执行所有样本的所有轮次
    async fn run_all(&self, dataset: Vec<Sample>) -> Vec<SampleRecord> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let scorer = Arc::new(SuperrationalScorer::new(ModelGrader::new(self.grader.clone())));
        let flow = Arc::new(SampleFlow::new(
            self.model.clone(),
            scorer,
            self.config.verbose_logging,
        ));
        let dataset = Arc::new(dataset);
        let total_epochs = self.config.epochs;

        let mut handles = Vec::with_capacity(dataset.len() * total_epochs);

        for epoch in 1..=total_epochs {
            for index in 0..dataset.len() {
                let semaphore = semaphore.clone();
                let flow = flow.clone();
                let dataset = dataset.clone();

                handles.push(tokio::spawn(async move {
                    let sample = &dataset[index];
                    let ctx = SampleCtx::new(sample.id, epoch, total_epochs);
                    // semaphore 不会被关闭
                    let _permit = semaphore.acquire_owned().await.ok();
                    flow.run(sample, &ctx).await
                }));
            }
        }

        let mut records = Vec::with_capacity(handles.len());
        for result in join_all(handles).await {
            match result {
                Ok(record) => records.push(record),
                Err(e) => error!("任务执行失败: {}", e),
            }
        }

        records.sort_by_key(|r| (r.epoch, r.id));
        records
    }
}

/// 没有任何样本完成评分时，用第一条错误作为整次评测的错误
fn run_error(records: &[SampleRecord], completed: usize) -> Option<String> {
    if completed > 0 || records.is_empty() {
        return None;
    }
    let first = records
        .iter()
        .find_map(|r| r.error.clone())
        .unwrap_or_else(|| "没有样本完成评分".to_string());
    Some(format!("{} 条记录均未完成评分: {}", records.len(), first))
}

/// 用创建时间生成任务ID
fn task_id(created: &chrono::DateTime<chrono::Local>) -> String {
    let nanos = created.timestamp_nanos_opt().unwrap_or_default();
    format!("{:x}", nanos)
}

/// 按配置运行一次完整评测
pub async fn run_eval(config: Config) -> AppResult<EvalOutcome> {
    EvalRunner::from_config(config)?.run().await
}
