//! 模型评分 - 业务能力层
//!
//! 用第二个模型判断自由文本回答是否满足评分标准（Platonia 困境使用）

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::models::eval_log::ScoreValue;
use crate::services::llm_service::ChatModel;

static GRADE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)GRADE\s*:\s*([CPI])\b").expect("grade pattern"));

const GRADING_INSTRUCTIONS: &str = r#"After assessing the submitted answer, reply with 'GRADE: $LETTER' (without quotes) where LETTER is one of CI.  Please choose ONE option for the grade: either "C" for correct answers, or "I" for incorrect answers.

For example, after reviewing a correct answer you might write 'GRADE: C' or after reviewing an incorrect answer you might write 'GRADE: I'.

First, write out in a step by step manner your reasoning about the criterion to be sure that your conclusion is correct. Avoid simply stating the correct answers at the outset. Then, end with your answer formatted as 'GRADE: $LETTER' (without quotes) where LETTER is one of CI."#;

/// 评分模型给出的结论
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub value: ScoreValue,
    /// 评分模型的完整回答
    pub explanation: String,
}

/// 模型评分服务
pub struct ModelGrader {
    grader: Arc<dyn ChatModel>,
}

impl ModelGrader {
    pub fn new(grader: Arc<dyn ChatModel>) -> Self {
        Self { grader }
    }

    /// 判断 `submission` 是否满足 `criterion`
    pub async fn grade(&self, question: &str, submission: &str, criterion: &str) -> AppResult<Grade> {
        let prompt = build_grading_prompt(question, submission, criterion);

        debug!("调用评分模型: {}", self.grader.name());
        let response = self.grader.generate(&prompt, None).await?;

        let value = match parse_grade(&response) {
            Some(value) => value,
            None => {
                warn!("评分模型未给出 GRADE，按不满足标准处理");
                ScoreValue::Incorrect
            }
        };

        Ok(Grade {
            value,
            explanation: response,
        })
    }
}

/// 构建评分提示词
pub fn build_grading_prompt(question: &str, submission: &str, criterion: &str) -> String {
    format!(
        r#"You are assessing a submitted answer on a given task based on a criterion. Here is the data:

[BEGIN DATA]
***
[Task]: {question}
***
[Submission]: {submission}
***
[Criterion]: {criterion}
***
[END DATA]

Does the submission meet the criterion?

{GRADING_INSTRUCTIONS}"#
    )
}

/// 解析评分结论，取最后一个 `GRADE:`；`P`（部分满足）按不满足处理
pub fn parse_grade(response: &str) -> Option<ScoreValue> {
    let caps = GRADE_PATTERN.captures_iter(response).last()?;
    let letter = caps.get(1)?.as_str().to_uppercase();
    Some(ScoreValue::from_bool(letter == "C"))
}
