//! 实验变量：对手设定与出手顺序

use serde::{Deserialize, Serialize};
use std::fmt;

/// 对手设定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayersVariant {
    SameModel,
    DiffModelSimilarlyRational,
    DiffModelOtherAgents,
    OtherHumans,
    OtherRationalHumans,
}

impl PlayersVariant {
    /// 声明顺序，也是生成样本的顺序
    pub const ALL: [PlayersVariant; 5] = [
        PlayersVariant::SameModel,
        PlayersVariant::DiffModelSimilarlyRational,
        PlayersVariant::DiffModelOtherAgents,
        PlayersVariant::OtherHumans,
        PlayersVariant::OtherRationalHumans,
    ];

    /// 图表横轴顺序：从"与自己最相似"到"与自己最不同"
    pub const PLOT_ORDER: [PlayersVariant; 5] = [
        PlayersVariant::SameModel,
        PlayersVariant::DiffModelSimilarlyRational,
        PlayersVariant::DiffModelOtherAgents,
        PlayersVariant::OtherRationalHumans,
        PlayersVariant::OtherHumans,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PlayersVariant::SameModel => "same_model",
            PlayersVariant::DiffModelSimilarlyRational => "diff_model_similarly_rational",
            PlayersVariant::DiffModelOtherAgents => "diff_model_other_agents",
            PlayersVariant::OtherHumans => "other_humans",
            PlayersVariant::OtherRationalHumans => "other_rational_humans",
        }
    }

    /// 写入提示词的对手描述
    pub fn setup_text(self) -> &'static str {
        match self {
            PlayersVariant::SameModel => "All players are instances of the same model as yourself.",
            PlayersVariant::DiffModelSimilarlyRational => "Other players are similarly rational AI agents like yourself, including from OpenAI, Anthropic, DeepMind, and xAI.",
            PlayersVariant::DiffModelOtherAgents => "Other players are AI agents like yourself, including from OpenAI, Anthropic, DeepMind, and xAI.",
            PlayersVariant::OtherHumans => "You will be playing against other humans.",
            PlayersVariant::OtherRationalHumans => "You will be playing against other rational humans.",
        }
    }

    /// 柱状图横轴标签
    pub fn bar_label(self) -> &'static str {
        match self {
            PlayersVariant::SameModel => "Instances of the same model as yourself",
            PlayersVariant::DiffModelSimilarlyRational => "Similarly rational AI agents",
            PlayersVariant::DiffModelOtherAgents => "Similar AI agents",
            PlayersVariant::OtherRationalHumans => "Other rational humans",
            PlayersVariant::OtherHumans => "Other humans",
        }
    }

    /// 热力图与多模型对比图的横轴标签
    pub fn short_label(self) -> &'static str {
        match self {
            PlayersVariant::SameModel => "Same model instances",
            PlayersVariant::DiffModelSimilarlyRational => "Similarly rational AI agents",
            PlayersVariant::DiffModelOtherAgents => "Other AI agents",
            PlayersVariant::OtherRationalHumans => "Similarly rational humans",
            PlayersVariant::OtherHumans => "Other humans",
        }
    }

    /// 从提示词中识别对手设定
    pub fn detect(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| input.contains(variant.setup_text()))
    }
}

impl fmt::Display for PlayersVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 出手顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOrderVariant {
    Default,
    OthersMoved,
    YouFirst,
}

impl MoveOrderVariant {
    pub const ALL: [MoveOrderVariant; 3] = [
        MoveOrderVariant::Default,
        MoveOrderVariant::OthersMoved,
        MoveOrderVariant::YouFirst,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MoveOrderVariant::Default => "default",
            MoveOrderVariant::OthersMoved => "others_moved",
            MoveOrderVariant::YouFirst => "you_first",
        }
    }

    pub fn order_text(self) -> &'static str {
        match self {
            MoveOrderVariant::Default => "The choice of each player is hidden from every other player.",
            MoveOrderVariant::OthersMoved => "The other player(s) have already submitted their choices. You cannot see them.",
            MoveOrderVariant::YouFirst => "You are the first to submit your choice, but other players will not see it.",
        }
    }

    /// 图例标签
    pub fn label(self) -> &'static str {
        match self {
            MoveOrderVariant::Default => "Simultaneous",
            MoveOrderVariant::OthersMoved => "Others First",
            MoveOrderVariant::YouFirst => "You First",
        }
    }

    pub fn detect(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| input.contains(variant.order_text()))
    }
}

impl fmt::Display for MoveOrderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_player_variant() {
        let input = format!(
            "header\n\n{}\n\n{}",
            PlayersVariant::OtherRationalHumans.setup_text(),
            MoveOrderVariant::YouFirst.order_text()
        );
        assert_eq!(
            PlayersVariant::detect(&input),
            Some(PlayersVariant::OtherRationalHumans)
        );
        assert_eq!(
            MoveOrderVariant::detect(&input),
            Some(MoveOrderVariant::YouFirst)
        );
    }

    #[test]
    fn test_detect_does_not_confuse_humans_variants() {
        // "other humans" 的句子不是 "other rational humans" 的子串
        let input = PlayersVariant::OtherHumans.setup_text();
        assert_eq!(PlayersVariant::detect(input), Some(PlayersVariant::OtherHumans));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(PlayersVariant::detect("nothing here"), None);
        assert_eq!(MoveOrderVariant::detect("nothing here"), None);
    }

    #[test]
    fn test_plot_order_is_a_permutation() {
        let mut plot = PlayersVariant::PLOT_ORDER.to_vec();
        let mut all = PlayersVariant::ALL.to_vec();
        plot.sort();
        all.sort();
        assert_eq!(plot, all);
    }
}
