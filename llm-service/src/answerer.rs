//! Bangla answer generation over retrieved FAQ context.

use async_trait::async_trait;

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::LlmError;
use crate::openai_service::OpenAiService;
use crate::retry::RetryPolicy;

/// Generation seam used by the request handler.
///
/// The instruction text asks the model to answer only from the supplied
/// context and to decline explicitly when the context is insufficient;
/// enforcement of that constraint is the model's responsibility.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate_answer(&self, question: &str, context: &str) -> Result<String, LlmError>;
}

/// Builds the fixed Bangla prompt: instruction, context, question verbatim.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "তুমি একজন বাংলা সহকারী।\n\
         শুধুমাত্র নিচের তথ্য ব্যবহার করে উত্তর দাও।\n\
         যদি তথ্য না পাওয়া যায়, বলো: \"এই বিষয়ে আমার কাছে তথ্য নেই।\"\n\
         \n\
         তথ্য:\n\
         {context}\n\
         \n\
         প্রশ্ন:\n\
         {question}\n\
         \n\
         উত্তর বাংলা ভাষায় দাও।"
    )
}

/// Chat-completion-backed answer generator with bounded retry.
pub struct BanglaAnswerer {
    service: OpenAiService,
    retry: RetryPolicy,
}

impl BanglaAnswerer {
    pub fn new(cfg: LlmModelConfig, retry: RetryPolicy) -> Result<Self, LlmError> {
        Ok(Self {
            service: OpenAiService::new(cfg)?,
            retry,
        })
    }
}

#[async_trait]
impl AnswerGenerator for BanglaAnswerer {
    async fn generate_answer(&self, question: &str, context: &str) -> Result<String, LlmError> {
        let prompt = build_prompt(question, context);

        let raw = self
            .retry
            .run(|| self.service.generate(&prompt, None))
            .await?;

        Ok(raw.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_context_and_question_verbatim() {
        let prompt = build_prompt(
            "বাংলাদেশের রাজধানী কোথায়?",
            "প্রশ্ন: ক?\nউত্তর: খ।",
        );

        assert!(prompt.starts_with("তুমি একজন বাংলা সহকারী।"));
        assert!(prompt.contains("তথ্য:\nপ্রশ্ন: ক?\nউত্তর: খ।"));
        assert!(prompt.contains("প্রশ্ন:\nবাংলাদেশের রাজধানী কোথায়?"));
        assert!(prompt.ends_with("উত্তর বাংলা ভাষায় দাও।"));
    }

    #[test]
    fn prompt_instructs_declining_on_insufficient_context() {
        let prompt = build_prompt("x", "y");
        assert!(prompt.contains("যদি তথ্য না পাওয়া যায়, বলো: \"এই বিষয়ে আমার কাছে তথ্য নেই।\""));
    }
}
