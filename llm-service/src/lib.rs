//! OpenAI-compatible LLM client with Bangla answer generation and bounded
//! retry on the generation call.

pub mod answerer;
pub mod config;
pub mod error_handler;
pub mod openai_service;
pub mod retry;

pub use answerer::{AnswerGenerator, BanglaAnswerer};
pub use error_handler::LlmError;
pub use openai_service::OpenAiService;
