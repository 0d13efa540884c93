//! 评测样本与数据集

use serde::{Deserialize, Serialize};

use crate::models::game::{GameFamily, GameType, PREFIX};
use crate::models::variant::{MoveOrderVariant, PlayersVariant};

/// Platonia 困境的评分标准
pub const PLATONIA_CRITERION: &str = "The submission uses a randomized approach.";

/// 超理性答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Target {
    /// 单个字母，如 "C"
    Letter(String),
    /// 单个单词，如 "REFRAIN"
    Word(String),
    /// 交给评分模型判断的标准
    Criterion(String),
}

impl Target {
    pub fn for_game(game: GameType) -> Self {
        match game.family() {
            GameFamily::PrisonersDilemma => Target::Letter("C".to_string()),
            GameFamily::Platonia => Target::Criterion(PLATONIA_CRITERION.to_string()),
            GameFamily::Wolf => Target::Word("REFRAIN".to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Target::Letter(text) | Target::Word(text) | Target::Criterion(text) => text,
        }
    }
}

/// 单个评测样本
#[derive(Debug, Clone)]
pub struct Sample {
    /// 从 1 开始
    pub id: usize,
    pub input: String,
    pub target: Target,
    pub game: GameType,
    pub player_variant: PlayersVariant,
    pub move_order: MoveOrderVariant,
}

impl Sample {
    pub fn new(
        id: usize,
        game: GameType,
        player_variant: PlayersVariant,
        move_order: MoveOrderVariant,
    ) -> Self {
        Self {
            id,
            input: build_prompt(game, player_variant, move_order),
            target: Target::for_game(game),
            game,
            player_variant,
            move_order,
        }
    }
}

/// 拼装提示词
pub fn build_prompt(
    game: GameType,
    player_variant: PlayersVariant,
    move_order: MoveOrderVariant,
) -> String {
    format!(
        "{}\n\n{}\n\n{}\n\n{}\n\n{}\n",
        PREFIX,
        game.description(),
        player_variant.setup_text(),
        move_order.order_text(),
        game.instruction()
    )
}

/// 生成完整数据集：博弈 × 对手设定 × 出手顺序
pub fn build_dataset() -> Vec<Sample> {
    let mut samples = Vec::with_capacity(
        GameType::ALL.len() * PlayersVariant::ALL.len() * MoveOrderVariant::ALL.len(),
    );
    for game in GameType::ALL {
        for player_variant in PlayersVariant::ALL {
            for move_order in MoveOrderVariant::ALL {
                samples.push(Sample::new(
                    samples.len() + 1,
                    game,
                    player_variant,
                    move_order,
                ));
            }
        }
    }
    samples
}
