//! Configuration for the chat-completion model invocation.

use crate::error_handler::{Result, env_opt_f32, env_opt_u32, env_opt_u64, validate_range};

/// Configuration for an LLM model invocation.
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// Model identifier string (e.g., `"gpt-4.1-mini"`).
    pub model: String,

    /// Inference endpoint (OpenAI-compatible base URL).
    pub endpoint: String,

    /// Optional API key. Deliberately not validated at startup: a missing
    /// credential surfaces as an upstream auth failure at the first
    /// generation call.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature. Kept low for near-deterministic answers.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Reads the configuration from environment variables with defaults
    /// matching the hosted GitHub Models deployment.
    pub fn from_env() -> Result<Self> {
        let temperature = env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(0.3);
        validate_range(
            "temperature",
            temperature,
            0.0,
            2.0,
            "expected 0.0..=2.0",
        )?;

        let top_p = env_opt_f32("LLM_TOP_P")?;
        if let Some(p) = top_p {
            validate_range("top_p", p, 0.0, 1.0, "expected 0.0..=1.0")?;
        }

        Ok(Self {
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".into()),
            endpoint: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://models.inference.ai.azure.com".into()),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
            temperature: Some(temperature),
            top_p,
            timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?,
        })
    }
}
