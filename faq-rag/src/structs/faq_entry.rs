//! FAQ dataset records and the text shape derived from them for indexing.

use serde::{Deserialize, Serialize};

/// One static question/answer record with topic and difficulty tags.
///
/// Loaded once from the dataset file at startup and never mutated.
/// Uniqueness of `id` within the dataset is assumed but not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub metadata: FaqMetadata,
}

/// Tags used for exact-match retrieval filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqMetadata {
    pub topic: String,
    pub difficulty: String,
}

impl FaqEntry {
    /// Bangla-labeled question+answer text. The same shape is embedded at
    /// index time and later concatenated into the generation context.
    pub fn document_text(&self) -> String {
        format!("প্রশ্ন: {}\nউত্তর: {}", self.question, self.answer)
    }
}
