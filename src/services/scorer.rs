//! 超理性记分器 - 业务能力层
//!
//! 按博弈大类选择评分方式：
//! - 囚徒困境：字母答案与目标比较
//! - Platonia：模型评分
//! - 狼困境：单词答案与目标比较

use std::collections::BTreeMap;
use tracing::debug;

use crate::error::AppResult;
use crate::models::eval_log::{Score, ScoreValue};
use crate::models::game::GameFamily;
use crate::models::sample::Sample;
use crate::services::answer::{extract_choice, is_superrational_choice};
use crate::services::model_grader::ModelGrader;

/// 超理性记分器
pub struct SuperrationalScorer {
    grader: ModelGrader,
}

impl SuperrationalScorer {
    pub fn new(grader: ModelGrader) -> Self {
        Self { grader }
    }

    /// 为一次回答评分
    pub async fn score(&self, sample: &Sample, completion: &str) -> AppResult<Score> {
        let extracted = extract_choice(sample.game, completion);

        let score = match sample.game.family() {
            GameFamily::Platonia => {
                let grade = self
                    .grader
                    .grade(&sample.input, completion, sample.target.text())
                    .await?;
                Score {
                    value: grade.value,
                    // 没有提取到 SEND / NOTSEND 时保留完整回答
                    answer: extracted.unwrap_or_else(|| completion.to_string()),
                    explanation: Some(grade.explanation),
                }
            }
            GameFamily::PrisonersDilemma | GameFamily::Wolf => match extracted {
                Some(answer) => {
                    let correct = is_superrational_choice(sample.game, &answer)
                        .unwrap_or_else(|| answer.eq_ignore_ascii_case(sample.target.text()));
                    Score {
                        value: ScoreValue::from_bool(correct),
                        answer,
                        explanation: None,
                    }
                }
                None => Score {
                    value: ScoreValue::Incorrect,
                    answer: String::new(),
                    explanation: Some("回答中没有找到 ANSWER 格式的选择".to_string()),
                },
            },
        };

        debug!(
            "样本 {} ({}) 评分: {:?}, 答案: {}",
            sample.id, sample.game, score.value, score.answer
        );

        Ok(score)
    }
}

/// 汇总指标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub accuracy: f64,
    pub stderr: f64,
    /// 参与计算的样本数（多轮已合并）
    pub samples: usize,
}

/// 计算 accuracy 与 stderr
///
/// `scores` 为 (样本 id, 分数)；同一样本多轮的分数先取平均，再在样本间计算均值与标准误
pub fn compute_metrics(scores: &[(usize, ScoreValue)]) -> Metrics {
    let mut per_sample: BTreeMap<usize, (f64, usize)> = BTreeMap::new();
    for (id, value) in scores {
        let entry = per_sample.entry(*id).or_insert((0.0, 0));
        entry.0 += value.as_f64();
        entry.1 += 1;
    }

    let values: Vec<f64> = per_sample
        .values()
        .map(|(sum, count)| sum / *count as f64)
        .collect();

    let n = values.len();
    if n == 0 {
        return Metrics {
            accuracy: 0.0,
            stderr: 0.0,
            samples: 0,
        };
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let stderr = if n < 2 {
        0.0
    } else {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        (variance / n as f64).sqrt()
    };

    Metrics {
        accuracy: mean,
        stderr,
        samples: n,
    }
}
