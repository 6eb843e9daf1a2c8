use serde::{Deserialize, Serialize};

/// Request payload for /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Natural language Bangla question.
    pub query: String,
    /// Optional exact-match topic filter.
    #[serde(default)]
    pub topic: Option<String>,
    /// Optional exact-match difficulty filter.
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Response payload for /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The generated Bangla answer, or the fixed no-match apology.
    pub answer: String,
}
