//! 评测日志格式
//!
//! 一次评测写出一个 JSON 文件，分析命令只读这个文件

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::game::GameType;

/// 评测日志格式版本
pub const LOG_VERSION: u32 = 1;

/// 记分器名称，也是 `scores` 中的键
pub const SCORER_NAME: &str = "superrational";

/// 评分结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreValue {
    /// 超理性
    #[serde(rename = "C")]
    Correct,
    /// 非超理性
    #[serde(rename = "I")]
    Incorrect,
}

impl ScoreValue {
    pub fn from_bool(correct: bool) -> Self {
        if correct {
            ScoreValue::Correct
        } else {
            ScoreValue::Incorrect
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            ScoreValue::Correct => 1.0,
            ScoreValue::Incorrect => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub value: ScoreValue,
    /// 从回答中提取的选择
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMetadata {
    pub game_key: GameType,
}

/// 单个样本单轮的记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub id: usize,
    pub epoch: usize,
    pub input: String,
    pub target: String,
    pub metadata: SampleMetadata,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub scores: BTreeMap<String, Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SampleRecord {
    pub fn superrational_score(&self) -> Option<&Score> {
        self.scores.get(SCORER_NAME)
    }
}

/// 评测基本信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSpec {
    pub task: String,
    pub task_id: String,
    pub model: String,
    pub grader_model: String,
    pub epochs: usize,
    pub dataset_samples: usize,
    pub created: String,
}

/// 汇总指标
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalResults {
    pub total_samples: usize,
    pub completed_samples: usize,
    pub accuracy: f64,
    pub stderr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalLog {
    pub version: u32,
    pub eval: EvalSpec,
    pub samples: Vec<SampleRecord>,
    #[serde(default)]
    pub results: EvalResults,
    /// 整次评测级别的错误（例如没有任何样本完成评分）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvalLog {
    /// 日志文件名：`<时间戳>_play-game_<task_id>.json`
    pub fn file_name(&self) -> String {
        let stamp = self.eval.created.replace([':', '.', '+'], "-");
        format!("{}_{}_{}.json", stamp, self.eval.task, self.eval.task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_value_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&ScoreValue::Correct).unwrap(), "\"C\"");
        assert_eq!(serde_json::to_string(&ScoreValue::Incorrect).unwrap(), "\"I\"");
    }

    #[test]
    fn test_record_without_scores_deserializes() {
        let json = r#"{
            "id": 3, "epoch": 1, "input": "prompt", "target": "C",
            "metadata": {"game_key": "prisoner_dilemma"},
            "error": "timeout"
        }"#;
        let record: SampleRecord = serde_json::from_str(json).unwrap();
        assert!(record.superrational_score().is_none());
        assert_eq!(record.metadata.game_key, GameType::PrisonerDilemma);
        assert_eq!(record.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_log_without_error_field_deserializes() {
        let json = r#"{
            "version": 1,
            "eval": {"task": "play-game", "task_id": "t", "model": "m", "grader_model": "g",
                     "epochs": 1, "dataset_samples": 0, "created": "2025-10-03T21:33:43+04:00"},
            "samples": []
        }"#;
        let log: EvalLog = serde_json::from_str(json).unwrap();
        assert!(log.error.is_none());
        assert_eq!(log.results, EvalResults::default());
    }

    #[test]
    fn test_file_name_has_no_colons() {
        let log = EvalLog {
            version: LOG_VERSION,
            eval: EvalSpec {
                task: "play-game".into(),
                task_id: "abc123".into(),
                model: "openai/gpt-4o".into(),
                grader_model: "openai/gpt-5-mini".into(),
                epochs: 1,
                dataset_samples: 90,
                created: "2025-10-03T21:33:43+04:00".into(),
            },
            samples: vec![],
            results: EvalResults::default(),
            error: None,
        };
        assert!(!serde_json::to_string(&log).unwrap().contains("\"error\""));
        assert_eq!(
            log.file_name(),
            "2025-10-03T21-33-43-04-00_play-game_abc123.json"
        );
    }
}
