//! 答案提取与超理性判定
//!
//! 回答的格式约定为 `ANSWER: X`，取最后一次出现的位置

use regex::Regex;
use std::sync::LazyLock;

use crate::models::game::{GameFamily, GameType};

static LETTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)ANSWER\s*:\s*[*_`"']*\s*([A-Za-z])\b"#).expect("letter pattern")
});

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)ANSWER\s*:\s*[*_`"']*\s*(\w+)"#).expect("word pattern")
});

/// 答案格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerPattern {
    /// 单个字母，如 C / D
    Letter,
    /// 单个单词，如 PUSH / REFRAIN
    Word,
}

impl AnswerPattern {
    pub fn for_game(game: GameType) -> Self {
        match game.family() {
            GameFamily::PrisonersDilemma => AnswerPattern::Letter,
            GameFamily::Platonia | GameFamily::Wolf => AnswerPattern::Word,
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            AnswerPattern::Letter => &LETTER_PATTERN,
            AnswerPattern::Word => &WORD_PATTERN,
        }
    }
}

/// 提取回答中的选择（大写）
///
/// 提示词里本身就有 `ANSWER: LETTER` 这样的说明，模型可能会复述，所以取最后一个
pub fn extract_answer(completion: &str, pattern: AnswerPattern) -> Option<String> {
    pattern
        .regex()
        .captures_iter(completion)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}

/// 按博弈提取选择
///
/// 囚徒困境优先取单个字母；没有时再接受整词（如 `ANSWER: COOPERATE`）
pub fn extract_choice(game: GameType, completion: &str) -> Option<String> {
    match AnswerPattern::for_game(game) {
        AnswerPattern::Letter => extract_answer(completion, AnswerPattern::Letter)
            .or_else(|| extract_answer(completion, AnswerPattern::Word)),
        AnswerPattern::Word => extract_answer(completion, AnswerPattern::Word),
    }
}

/// 判断选择是否超理性
///
/// - 囚徒困境：`C` / `COOPERATE` 为超理性，`D` / `DEFECT` 不是
/// - 狼困境：`REFRAIN` 为超理性，`PUSH` 不是
/// - Platonia：无法通过选择判断，返回 `None`
pub fn is_superrational_choice(game: GameType, answer: &str) -> Option<bool> {
    let answer = answer.trim().to_uppercase();
    match game.family() {
        GameFamily::PrisonersDilemma => match answer.as_str() {
            "C" | "COOPERATE" => Some(true),
            "D" | "DEFECT" => Some(false),
            _ => None,
        },
        GameFamily::Wolf => match answer.as_str() {
            "REFRAIN" => Some(true),
            "PUSH" => Some(false),
            _ => None,
        },
        GameFamily::Platonia => None,
    }
}

/// Platonia 回答是否选择发送信号
pub fn is_send(answer: &str) -> bool {
    let answer = answer.to_uppercase();
    answer.contains("SEND") && !answer.contains("NOTSEND")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_letter() {
        assert_eq!(
            extract_answer("I will cooperate.\nANSWER: C", AnswerPattern::Letter),
            Some("C".to_string())
        );
        assert_eq!(
            extract_answer("answer: d", AnswerPattern::Letter),
            Some("D".to_string())
        );
        assert_eq!(
            extract_answer("**ANSWER: C**", AnswerPattern::Letter),
            Some("C".to_string())
        );
    }

    #[test]
    fn test_extract_takes_last_occurrence() {
        let completion = "The format is ANSWER: LETTER. Thinking...\nANSWER: D";
        assert_eq!(
            extract_answer(completion, AnswerPattern::Letter),
            Some("D".to_string())
        );
    }

    #[test]
    fn test_letter_pattern_rejects_words() {
        // 一个完整单词不能被当成字母答案
        assert_eq!(extract_answer("ANSWER: Cooperate", AnswerPattern::Letter), None);
    }

    #[test]
    fn test_extract_choice_accepts_prisoner_dilemma_words() {
        let pd = GameType::PrisonerDilemma;
        assert_eq!(
            extract_choice(pd, "I choose to cooperate.\nANSWER: COOPERATE"),
            Some("COOPERATE".to_string())
        );
        assert_eq!(extract_choice(pd, "ANSWER: defect"), Some("DEFECT".to_string()));
        // 字母优先
        assert_eq!(
            extract_choice(pd, "Format: ANSWER: LETTER\nANSWER: C"),
            Some("C".to_string())
        );
        assert_eq!(extract_choice(pd, "no answer here"), None);
        assert_eq!(
            extract_choice(GameType::WolfDilemma, "ANSWER: PUSH"),
            Some("PUSH".to_string())
        );
    }

    #[test]
    fn test_extract_word() {
        assert_eq!(
            extract_answer("Refraining is best.\nANSWER: REFRAIN", AnswerPattern::Word),
            Some("REFRAIN".to_string())
        );
        assert_eq!(
            extract_answer("ANSWER: notsend", AnswerPattern::Word),
            Some("NOTSEND".to_string())
        );
        assert_eq!(extract_answer("I push.", AnswerPattern::Word), None);
    }

    #[test]
    fn test_prisoner_dilemma_choices() {
        for game in [GameType::PrisonerDilemma, GameType::NPlayerPrisonerDilemma] {
            assert_eq!(is_superrational_choice(game, "C"), Some(true));
            assert_eq!(is_superrational_choice(game, "COOPERATE"), Some(true));
            assert_eq!(is_superrational_choice(game, "cooperate"), Some(true));
            assert_eq!(is_superrational_choice(game, "D"), Some(false));
            assert_eq!(is_superrational_choice(game, "DEFECT"), Some(false));
            assert_eq!(is_superrational_choice(game, "maybe"), None);
        }
    }

    #[test]
    fn test_wolf_choices() {
        for game in [GameType::WolfDilemma, GameType::ModifiedWolfDilemma] {
            assert_eq!(is_superrational_choice(game, "REFRAIN"), Some(true));
            assert_eq!(is_superrational_choice(game, "PUSH"), Some(false));
        }
    }

    #[test]
    fn test_platonia_not_decidable_by_choice() {
        assert_eq!(is_superrational_choice(GameType::PlatoniaDilemma, "SEND"), None);
    }

    #[test]
    fn test_is_send() {
        assert!(is_send("SEND"));
        assert!(is_send("send"));
        assert!(!is_send("NOTSEND"));
        assert!(!is_send(""));
    }
}
