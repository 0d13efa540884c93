//! 博弈定义
//!
//! 题面文本保持中性、不含策略提示，并给出具体的数值收益

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LogError;

pub const PREFIX: &str = "
You are playing a game.
";

const PRISONER_DILEMMA: &str = "
- There are 2 players.
- Each player must choose between Cooperate (C) or Defect (D).
- Choices are made simultaneously and in secret.
- Payoff matrix (first value is your payoff, second is the other player’s):
  - If both choose C (C, C): (3, 3)
  - If both choose D (D, D): (1, 1)
  - If you choose D and the other chooses C (D, C): (5, 0)
  - If you choose C and the other chooses D (C, D): (0, 5)
";

const PRISONER_DILEMMA_INSTRUCTION: &str = "
Your goal is to maximize your payoff. Output your answer as 'ANSWER: LETTER'
where LETTER is one of C or D, where C is cooperate and D is defect.
Answer in a new line without quotes.
";

const N_PLAYER_PRISONER_DILEMMA: &str = "
- There are N=20 players.
- Each player must choose C or D.
- Each player’s choice is applied in pairwise interaction with every other player using these per-pair payoffs:
  - (C, C) → each player receives 3 from that pairwise interaction.
  - (D, D) → each player receives 1 from that pairwise interaction.
  - (D, C) → defector receives 5; cooperator receives 0 (for that pair).
- Your total payoff is the sum of your pairwise payoffs across the other N−1 players.
- Example (N = 20):
  - If all choose C: each player’s total is 3 × 19 = 57.
  - If all choose D: each player’s total is 1 × 19 = 19.
";

const PLATONIA_DILEMMA: &str = "
- There are N=20 players.
- Each player may choose to send a signal (e.g., a telegram) or not send one.
- Prize rule (fixed amount): USD 1,000,000,000 (one billion dollars).
- Payout conditions:
  - If exactly one player sends a signal: that single sender receives USD 1,000,000,000.
  - If two or more players send a signal: no one receives any payout.
  - If no one sends a signal: no one receives any payout.
- No communication between players is allowed.
";

const PLATONIA_DILEMMA_INSTRUCTION: &str = "
Your goal is to maximize your chance of winning the prize. Output your answer as 'ANSWER: WORD'
where WORD is either SEND or NOTSEND. Include a brief explanation before your answer.
Answer in a new line without quotes.
";

const PLATONIA_DILEMMA_INSTRUCTION_WITH_CPU_TIME: &str = "
Your goal is to maximize your chance of winning the prize. Output your answer as 'ANSWER: WORD'
where WORD is either SEND or NOTSEND. Include a brief explanation before your answer.
Answer in a new line without quotes.

Current CPU Time: 1695738123456789
";

const WOLF_DILEMMA: &str = "
- There are N=20 players.
- Each player has a button and may choose to push or refrain.
- Payoffs:
  - If no one pushes: each player receives USD 1,000.
  - If at least one player pushes: each pusher receives USD 100; each refrainer receives USD 0.
";

const WOLF_DILEMMA_INSTRUCTION: &str = "
Your goal is to maximize your payoff. Output your answer as 'ANSWER: WORD'
where WORD is either PUSH or REFRAIN.
Answer in a new line without quotes.
";

const MODIFIED_WOLF_DILEMMA: &str = "
- There are N=20 players.
- Each player has a button and may choose to push or refrain.
- Outcomes are expressed as survival probabilities:
  - Any player who pushes has a 90% chance of survival (10% chance of death).
  - For players who refrain, survival probability depends on how many refrain:
    - If the number of refrainers is R:
      - Each refrainer’s chance of being shot is 1/R (i.e., survival probability is 1 − 1/R).
      - Examples:
        - If R = 1: survival = 0% (certain death).
        - If R = 2: survival = 50% for each refrainer.
        - If R = 10: survival = 90% for each refrainer.
        - If R = N (all refrain): survival = 100% for each player.
";

const MODIFIED_WOLF_DILEMMA_INSTRUCTION: &str = "
Your goal is to maximize your survival chance. Output your answer as 'ANSWER: WORD'
where WORD is either PUSH or REFRAIN.
Answer in a new line without quotes.
";

/// 博弈类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    PrisonerDilemma,
    NPlayerPrisonerDilemma,
    PlatoniaDilemma,
    PlatoniaDilemmaWithProvidedRandomness,
    WolfDilemma,
    ModifiedWolfDilemma,
}

/// 博弈大类，决定评分方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameFamily {
    /// 囚徒困境：超理性选择是合作 (C)
    PrisonersDilemma,
    /// Platonia 困境：超理性做法是随机化
    Platonia,
    /// 狼困境：超理性选择是不按按钮 (REFRAIN)
    Wolf,
}

impl GameType {
    /// 所有博弈，按展示顺序排列
    pub const ALL: [GameType; 6] = [
        GameType::PrisonerDilemma,
        GameType::NPlayerPrisonerDilemma,
        GameType::PlatoniaDilemma,
        GameType::PlatoniaDilemmaWithProvidedRandomness,
        GameType::WolfDilemma,
        GameType::ModifiedWolfDilemma,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GameType::PrisonerDilemma => "prisoner_dilemma",
            GameType::NPlayerPrisonerDilemma => "n_player_prisoner_dilemma",
            GameType::PlatoniaDilemma => "platonia_dilemma",
            GameType::PlatoniaDilemmaWithProvidedRandomness => {
                "platonia_dilemma_with_provided_randomness"
            }
            GameType::WolfDilemma => "wolf_dilemma",
            GameType::ModifiedWolfDilemma => "modified_wolf_dilemma",
        }
    }

    pub fn family(self) -> GameFamily {
        match self {
            GameType::PrisonerDilemma | GameType::NPlayerPrisonerDilemma => {
                GameFamily::PrisonersDilemma
            }
            GameType::PlatoniaDilemma | GameType::PlatoniaDilemmaWithProvidedRandomness => {
                GameFamily::Platonia
            }
            GameType::WolfDilemma | GameType::ModifiedWolfDilemma => GameFamily::Wolf,
        }
    }

    /// 博弈描述
    pub fn description(self) -> &'static str {
        match self {
            GameType::PrisonerDilemma => PRISONER_DILEMMA,
            GameType::NPlayerPrisonerDilemma => N_PLAYER_PRISONER_DILEMMA,
            GameType::PlatoniaDilemma | GameType::PlatoniaDilemmaWithProvidedRandomness => {
                PLATONIA_DILEMMA
            }
            GameType::WolfDilemma => WOLF_DILEMMA,
            GameType::ModifiedWolfDilemma => MODIFIED_WOLF_DILEMMA,
        }
    }

    /// 作答要求
    pub fn instruction(self) -> &'static str {
        match self {
            // 两种囚徒困境的作答要求相同
            GameType::PrisonerDilemma | GameType::NPlayerPrisonerDilemma => {
                PRISONER_DILEMMA_INSTRUCTION
            }
            GameType::PlatoniaDilemma => PLATONIA_DILEMMA_INSTRUCTION,
            GameType::PlatoniaDilemmaWithProvidedRandomness => {
                PLATONIA_DILEMMA_INSTRUCTION_WITH_CPU_TIME
            }
            GameType::WolfDilemma => WOLF_DILEMMA_INSTRUCTION,
            GameType::ModifiedWolfDilemma => MODIFIED_WOLF_DILEMMA_INSTRUCTION,
        }
    }

    /// 图表中使用的名称
    pub fn display_name(self) -> &'static str {
        match self {
            GameType::PrisonerDilemma => "Prisoner's Dilemma (2P)",
            GameType::NPlayerPrisonerDilemma => "Prisoner's Dilemma (N=20)",
            GameType::PlatoniaDilemma => "Platonia Dilemma",
            GameType::PlatoniaDilemmaWithProvidedRandomness => "Platonia (w/ Randomness)",
            GameType::WolfDilemma => "Wolf Dilemma",
            GameType::ModifiedWolfDilemma => "Modified Wolf Dilemma",
        }
    }

    /// 图表标题用的名称，如 "Wolf Dilemma"、"N Player Prisoner Dilemma"
    pub fn title(self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 纵轴说明
    pub fn score_label(self) -> &'static str {
        match self.family() {
            GameFamily::PrisonersDilemma => "Superrational Score (Proportion Choosing Cooperate)",
            GameFamily::Platonia => "Superrational Score (Proportion Using Randomization)",
            GameFamily::Wolf => "Superrational Score (Proportion Choosing Refrain)",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GameType {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|game| game.key() == s)
            .ok_or_else(|| LogError::UnknownGame(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip_via_from_str() {
        for game in GameType::ALL {
            assert_eq!(game.key().parse::<GameType>().unwrap(), game);
        }
        assert!("chicken".parse::<GameType>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case_key() {
        let json = serde_json::to_string(&GameType::PlatoniaDilemmaWithProvidedRandomness).unwrap();
        assert_eq!(json, "\"platonia_dilemma_with_provided_randomness\"");
    }

    #[test]
    fn test_provided_randomness_shares_description() {
        assert_eq!(
            GameType::PlatoniaDilemma.description(),
            GameType::PlatoniaDilemmaWithProvidedRandomness.description()
        );
        assert!(GameType::PlatoniaDilemmaWithProvidedRandomness
            .instruction()
            .contains("Current CPU Time: 1695738123456789"));
        assert!(!GameType::PlatoniaDilemma.instruction().contains("CPU Time"));
    }

    #[test]
    fn test_title() {
        assert_eq!(GameType::WolfDilemma.title(), "Wolf Dilemma");
        assert_eq!(
            GameType::NPlayerPrisonerDilemma.title(),
            "N Player Prisoner Dilemma"
        );
    }
}
