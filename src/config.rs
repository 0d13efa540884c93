/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 被评测的模型（`provider/model` 格式）
    pub eval_model: String,
    /// Platonia 博弈使用的评分模型
    pub grader_model: String,
    /// 每个样本重复的轮数
    pub epochs: usize,
    /// 同时进行的模型调用数量
    pub max_connections: usize,
    /// 只评测前 N 个样本（调试用）
    pub limit: Option<usize>,
    /// 评测日志输出目录
    pub log_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 自定义 OpenAI 兼容端点（可选） ---
    pub llm_api_base_url: Option<String>,
    pub llm_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eval_model: "openrouter/x-ai/grok-4".to_string(),
            grader_model: "openai/gpt-5-mini".to_string(),
            epochs: 10,
            max_connections: 90,
            limit: None,
            log_dir: "logs".to_string(),
            verbose_logging: false,
            llm_api_base_url: None,
            llm_api_key: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            eval_model: std::env::var("EVAL_MODEL").unwrap_or(default.eval_model),
            grader_model: std::env::var("GRADER_MODEL").unwrap_or(default.grader_model),
            epochs: std::env::var("EPOCHS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.epochs),
            max_connections: std::env::var("MAX_CONNECTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_connections),
            limit: std::env::var("SAMPLE_LIMIT").ok().and_then(|v| v.parse().ok()).or(default.limit),
            log_dir: std::env::var("LOG_DIR").unwrap_or(default.log_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").ok().or(default.llm_api_base_url),
            llm_api_key: std::env::var("LLM_API_KEY").ok().or(default.llm_api_key),
        }
    }
}
