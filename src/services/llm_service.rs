//! LLM 服务 - 业务能力层
//!
//! 只负责"调用模型"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 模型名称采用 `provider/model` 格式（如 `openrouter/x-ai/grok-4`）
//! - OpenAI、OpenRouter、Google、Anthropic 都通过各自的 OpenAI 兼容端点访问

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, LlmError};

/// 可以回答提示词的模型
///
/// 评测流程只依赖这个 trait，测试中可以替换为固定回答的实现
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// 完整模型名称（`provider/model`）
    fn name(&self) -> &str;

    /// 发送一次对话请求，返回去掉首尾空白的回答
    async fn generate(&self, user_message: &str, system_message: Option<&str>) -> AppResult<String>;
}

/// 模型提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    OpenRouter,
    Google,
    Anthropic,
    /// 通过 `LLM_API_BASE_URL` 指定的任意 OpenAI 兼容端点
    Custom,
}

impl Provider {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "openai" => Some(Provider::OpenAi),
            "openrouter" => Some(Provider::OpenRouter),
            "google" => Some(Provider::Google),
            "anthropic" => Some(Provider::Anthropic),
            _ => None,
        }
    }

    pub fn api_base(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("https://api.openai.com/v1"),
            Provider::OpenRouter => Some("https://openrouter.ai/api/v1"),
            Provider::Google => Some("https://generativelanguage.googleapis.com/v1beta/openai"),
            Provider::Anthropic => Some("https://api.anthropic.com/v1"),
            Provider::Custom => None,
        }
    }

    pub fn api_key_env(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::OpenRouter => "OPENROUTER_API_KEY",
            Provider::Google => "GOOGLE_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Custom => "LLM_API_KEY",
        }
    }
}

/// 解析后的模型名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    pub provider: Provider,
    /// 发送给 API 的模型名称（不含提供方前缀）
    pub model: String,
    /// 原始名称，用于日志
    pub full_name: String,
}

impl ModelRef {
    pub fn parse(name: &str) -> Result<Self, LlmError> {
        let name = name.trim();
        let invalid = || LlmError::InvalidModelName {
            name: name.to_string(),
        };

        if name.is_empty() {
            return Err(invalid());
        }

        let (provider, model) = match name.split_once('/') {
            Some((prefix, rest)) => match Provider::from_prefix(prefix) {
                Some(provider) => (provider, rest),
                None => (Provider::Custom, name),
            },
            None => (Provider::Custom, name),
        };

        if model.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            provider,
            model: model.to_string(),
            full_name: name.to_string(),
        })
    }
}

/// LLM 服务
///
/// 职责：
/// - 调用 OpenAI 兼容的 chat completions 接口
/// - 提供方返回的错误（包括非法 JSON）直接向上抛出，不重试
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model: ModelRef,
}

impl LlmService {
    /// 根据模型名称创建 LLM 服务
    pub fn new(model_name: &str, config: &Config) -> AppResult<Self> {
        let model = ModelRef::parse(model_name)?;

        let api_base = match model.provider.api_base() {
            Some(base) => base.to_string(),
            None => config.llm_api_base_url.clone().ok_or_else(|| {
                ConfigError::EnvVarNotFound {
                    var_name: "LLM_API_BASE_URL".to_string(),
                }
            })?,
        };

        let api_key = match model.provider {
            Provider::Custom => config.llm_api_key.clone(),
            provider => std::env::var(provider.api_key_env()).ok(),
        }
        .ok_or_else(|| ConfigError::EnvVarNotFound {
            var_name: model.provider.api_key_env().to_string(),
        })?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Ok(Self {
            client: Client::with_config(openai_config),
            model,
        })
    }

    fn build_failed(&self, source: impl std::error::Error + Send + Sync + 'static) -> AppError {
        AppError::Llm(LlmError::RequestBuildFailed {
            model: self.model.full_name.clone(),
            source: Box::new(source),
        })
    }
}

#[async_trait]
impl ChatModel for LlmService {
    fn name(&self) -> &str {
        &self.model.full_name
    }

    async fn generate(&self, user_message: &str, system_message: Option<&str>) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model.full_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(|e| self.build_failed(e))?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| self.build_failed(e))?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 不设置 temperature：部分推理模型只接受默认值
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model.model)
            .messages(messages)
            .build()
            .map_err(|e| self.build_failed(e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败 ({}): {}", self.model.full_name, e);
            AppError::llm_api_failed(&self.model.full_name, e)
        })?;

        debug!("LLM API 调用成功");

        let choice = response.choices.first().ok_or_else(|| LlmError::EmptyResponse {
            model: self.model.full_name.clone(),
        })?;

        let content = choice
            .message
            .content
            .clone()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model.full_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}
