//! 从评测日志中提取分析行

use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::models::eval_log::{EvalLog, ScoreValue};
use crate::models::game::{GameFamily, GameType};
use crate::models::variant::{MoveOrderVariant, PlayersVariant};
use crate::services::answer::{is_send, is_superrational_choice};

/// 从提示词识别出的变量；识别不出时为 `Unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Detected<T> {
    Known(T),
    Unknown,
}

impl<T> From<Option<T>> for Detected<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Detected::Unknown, Detected::Known)
    }
}

impl<T: fmt::Display> fmt::Display for Detected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detected::Known(value) => value.fmt(f),
            Detected::Unknown => f.write_str("unknown"),
        }
    }
}

/// 单条样本记录的分析结果
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRow {
    pub game: GameType,
    pub player_variant: Detected<PlayersVariant>,
    pub move_order: Detected<MoveOrderVariant>,
    pub is_superrational: bool,
    /// 只有 Platonia 博弈有值
    pub is_send: Option<bool>,
    pub answer: String,
    pub target: String,
}

/// 分析一个评测日志
///
/// 没有评分的记录（模型调用失败等）会被跳过
pub fn analyze_log(log: &EvalLog) -> Vec<AnalysisRow> {
    let mut rows = Vec::with_capacity(log.samples.len());

    for record in &log.samples {
        let Some(score) = record.superrational_score() else {
            warn!(
                "样本 #{} 轮次 {} 没有评分，跳过{}",
                record.id,
                record.epoch,
                record
                    .error
                    .as_deref()
                    .map(|e| format!(" ({})", e))
                    .unwrap_or_default()
            );
            continue;
        };

        let game = record.metadata.game_key;
        let is_platonia = game.family() == GameFamily::Platonia;

        let is_superrational = if is_platonia {
            // Platonia 由评分模型判断
            score.value == ScoreValue::Correct
        } else {
            is_superrational_choice(game, &score.answer)
                .unwrap_or_else(|| !record.target.is_empty() && score.answer == record.target)
        };

        rows.push(AnalysisRow {
            game,
            player_variant: PlayersVariant::detect(&record.input).into(),
            move_order: MoveOrderVariant::detect(&record.input).into(),
            is_superrational,
            is_send: is_platonia.then(|| is_send(&score.answer)),
            answer: score.answer.clone(),
            target: record.target.clone(),
        });
    }

    rows
}
