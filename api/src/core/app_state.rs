//! Shared application state, constructed once before the listener binds.

use std::sync::Arc;

use faq_rag::structs::faq_rag_config::FaqRagConfig;
use faq_rag::{FaqIndex, Retriever};
use llm_service::config::llm_model_config::LlmModelConfig;
use llm_service::retry::RetryPolicy;
use llm_service::{AnswerGenerator, BanglaAnswerer};

use crate::error_handler::AppError;

/// Per-request chat knobs.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Maximum number of FAQ entries retrieved per request.
    pub top_k: usize,
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let top_k = match std::env::var("CHAT_TOP_K") {
            Ok(v) if !v.trim().is_empty() => v
                .parse::<usize>()
                .ok()
                .filter(|k| *k > 0)
                .ok_or(AppError::BadConfig("CHAT_TOP_K must be a positive integer"))?,
            _ => 3,
        };
        Ok(Self { top_k })
    }
}

/// Shared state for all HTTP handlers.
///
/// The retriever and generator sit behind trait objects so handler tests can
/// substitute stubs; in production they are the Qdrant-backed index and the
/// chat-completion answerer.
pub struct AppState {
    pub retriever: Arc<dyn Retriever>,
    pub generator: Arc<dyn AnswerGenerator>,
    pub chat: ChatConfig,
}

impl AppState {
    /// Builds the index and the LLM client from environment configuration.
    /// The service accepts no meaningful traffic until this completes.
    pub async fn build() -> Result<Self, AppError> {
        let rag_cfg = FaqRagConfig::from_env()?;
        let index = FaqIndex::build_fresh(rag_cfg).await?;

        let llm_cfg = LlmModelConfig::from_env()?;
        let retry = RetryPolicy::from_env()?;
        let answerer = BanglaAnswerer::new(llm_cfg, retry)?;

        Ok(Self {
            retriever: Arc::new(index),
            generator: Arc::new(answerer),
            chat: ChatConfig::from_env()?,
        })
    }
}
