//! 样本处理流程 - 流程层
//!
//! 核心职责：定义"一个样本的一轮"的完整处理流程
//!
//! 流程顺序：
//! 1. 被评测模型作答
//! 2. 记分器评分（Platonia 会再调用一次评分模型）
//! 3. 生成样本记录

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::models::eval_log::{SampleMetadata, SampleRecord, SCORER_NAME};
use crate::models::sample::Sample;
use crate::services::{ChatModel, SuperrationalScorer};
use crate::utils::truncate_text;
use crate::workflow::sample_ctx::SampleCtx;

/// 样本处理流程
///
/// - 不持有并发资源（semaphore 由编排层管理）
/// - 只依赖业务能力（services）
/// - 模型或评分出错时记录到样本记录中，不中断整个评测
pub struct SampleFlow {
    model: Arc<dyn ChatModel>,
    scorer: Arc<SuperrationalScorer>,
    verbose_logging: bool,
}

impl SampleFlow {
    pub fn new(model: Arc<dyn ChatModel>, scorer: Arc<SuperrationalScorer>, verbose_logging: bool) -> Self {
        Self {
            model,
            scorer,
            verbose_logging,
        }
    }

    pub async fn run(&self, sample: &Sample, ctx: &SampleCtx) -> SampleRecord {
        let mut record = SampleRecord {
            id: sample.id,
            epoch: ctx.epoch,
            input: sample.input.clone(),
            target: sample.target.text().to_string(),
            metadata: SampleMetadata {
                game_key: sample.game,
            },
            output: String::new(),
            scores: BTreeMap::new(),
            error: None,
        };

        // ========== 1. 作答 ==========
        let completion = match self.model.generate(&sample.input, None).await {
            Ok(completion) => completion,
            Err(e) => {
                error!("{} ❌ 模型调用失败: {}", ctx, e);
                record.error = Some(e.to_string());
                return record;
            }
        };

        if self.verbose_logging {
            info!("{} 回答: {}", ctx, truncate_text(&completion, 120));
        }
        record.output = completion;

        // ========== 2. 评分 ==========
        match self.scorer.score(sample, &record.output).await {
            Ok(score) => {
                info!(
                    "{} ✓ {} | {} / {} → {:?} ({})",
                    ctx,
                    sample.game,
                    sample.player_variant,
                    sample.move_order,
                    score.value,
                    score.answer
                );
                record.scores.insert(SCORER_NAME.to_string(), score);
            }
            Err(e) => {
                warn!("{} ⚠️ 评分失败: {}", ctx, e);
                record.error = Some(e.to_string());
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult, LlmError};
    use crate::models::eval_log::ScoreValue;
    use crate::models::game::GameType;
    use crate::models::variant::{MoveOrderVariant, PlayersVariant};
    use crate::services::ModelGrader;
    use async_trait::async_trait;

    struct Scripted(Result<&'static str, ()>);

    #[async_trait]
    impl ChatModel for Scripted {
        fn name(&self) -> &str {
            "test/scripted"
        }

        async fn generate(&self, _user: &str, _system: Option<&str>) -> AppResult<String> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(AppError::Llm(LlmError::EmptyContent {
                    model: "test/scripted".into(),
                })),
            }
        }
    }

    fn flow(reply: Result<&'static str, ()>) -> SampleFlow {
        let scorer = SuperrationalScorer::new(ModelGrader::new(Arc::new(Scripted(Ok("GRADE: I")))));
        SampleFlow::new(Arc::new(Scripted(reply)), Arc::new(scorer), false)
    }

    fn sample() -> Sample {
        Sample::new(
            4,
            GameType::PrisonerDilemma,
            PlayersVariant::OtherHumans,
            MoveOrderVariant::YouFirst,
        )
    }

    #[tokio::test]
    async fn test_successful_sample_is_scored() {
        let record = flow(Ok("ANSWER: C")).run(&sample(), &SampleCtx::new(4, 2, 3)).await;
        assert_eq!(record.id, 4);
        assert_eq!(record.epoch, 2);
        assert_eq!(record.target, "C");
        assert_eq!(record.output, "ANSWER: C");
        assert!(record.error.is_none());
        assert_eq!(
            record.superrational_score().map(|s| s.value),
            Some(ScoreValue::Correct)
        );
    }

    #[tokio::test]
    async fn test_model_error_is_recorded() {
        let record = flow(Err(())).run(&sample(), &SampleCtx::new(4, 1, 1)).await;
        assert!(record.superrational_score().is_none());
        assert!(record.error.unwrap().contains("LLM返回内容为空"));
    }

    #[test]
    fn test_ctx_display() {
        assert_eq!(SampleCtx::new(3, 1, 10).to_string(), "[样本 #3 轮次 1/10]");
    }
}
