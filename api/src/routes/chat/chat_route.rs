//! POST /chat — retrieval-grounded Bangla answering.

use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use faq_rag::structs::retrieval::RetrievalFilter;
use tracing::{debug, info};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// Fixed Bangla reply when retrieval finds nothing; the generator is
/// bypassed entirely on this branch.
pub const NO_MATCH_ANSWER: &str = "দুঃখিত 😔 এই বিষয়ে এখনো আমার কাছে তথ্য নেই।";

/// Separator between retrieved FAQ texts in the generation context.
const CONTEXT_SEPARATOR: &str = "\n\n";

/// Handler: POST /chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"query":"বাংলাদেশের রাজধানী কোথায়?","topic":"geography"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    debug!(
        target: "api::chat",
        request_id = %request_id,
        query = %req.query,
        topic = ?req.topic,
        difficulty = ?req.difficulty,
        "chat: start"
    );

    let filter = RetrievalFilter {
        topic: req.topic,
        difficulty: req.difficulty,
    };

    let hits = state
        .retriever
        .retrieve(&req.query, &filter, state.chat.top_k)
        .await?;

    if hits.is_empty() {
        info!(
            target: "api::chat",
            request_id = %request_id,
            "chat: no matching entries, returning fallback answer"
        );
        return Ok(Json(ChatResponse {
            answer: NO_MATCH_ANSWER.to_string(),
        }));
    }

    // Retrieval-rank order is preserved end to end.
    let context = hits
        .iter()
        .map(|h| h.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);

    let answer = state.generator.generate_answer(&req.query, &context).await?;

    info!(
        target: "api::chat",
        request_id = %request_id,
        hits = hits.len(),
        "chat: answered"
    );

    Ok(Json(ChatResponse { answer }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app_state::ChatConfig;
    use async_trait::async_trait;
    use faq_rag::Retriever;
    use faq_rag::errors::faq_rag_error::FaqRagError;
    use faq_rag::structs::faq_entry::{FaqEntry, FaqMetadata};
    use faq_rag::structs::retrieval::RetrievedFaq;
    use llm_service::{AnswerGenerator, LlmError};
    use serde_json::json;
    use std::sync::Mutex;

    /// In-memory retriever applying the same equality-AND filter semantics
    /// as the real index, recording every call.
    struct StubRetriever {
        entries: Vec<RetrievedFaq>,
        calls: Mutex<Vec<(String, RetrievalFilter, usize)>>,
    }

    impl StubRetriever {
        fn new(entries: Vec<RetrievedFaq>) -> Self {
            Self {
                entries,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Retriever for StubRetriever {
        async fn retrieve(
            &self,
            query: &str,
            filter: &RetrievalFilter,
            k: usize,
        ) -> Result<Vec<RetrievedFaq>, FaqRagError> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), filter.clone(), k));

            Ok(self
                .entries
                .iter()
                .filter(|e| {
                    filter.topic.as_deref().map_or(true, |t| t == e.topic)
                        && filter
                            .difficulty
                            .as_deref()
                            .map_or(true, |d| d == e.difficulty)
                })
                .take(k)
                .cloned()
                .collect())
        }
    }

    /// Echoes the assembled context back as the answer.
    struct EchoGenerator;

    #[async_trait]
    impl AnswerGenerator for EchoGenerator {
        async fn generate_answer(&self, _q: &str, context: &str) -> Result<String, LlmError> {
            Ok(context.to_string())
        }
    }

    /// Fails the test if the generator is ever invoked.
    struct NeverGenerator;

    #[async_trait]
    impl AnswerGenerator for NeverGenerator {
        async fn generate_answer(&self, _q: &str, _c: &str) -> Result<String, LlmError> {
            panic!("generator must not be invoked on the no-match branch");
        }
    }

    fn hit(id: &str, text: &str, topic: &str, difficulty: &str) -> RetrievedFaq {
        RetrievedFaq {
            score: 0.9,
            id: id.into(),
            text: text.into(),
            topic: topic.into(),
            difficulty: difficulty.into(),
        }
    }

    fn state(retriever: Arc<StubRetriever>, generator: Arc<dyn AnswerGenerator>) -> Arc<AppState> {
        Arc::new(AppState {
            retriever,
            generator,
            chat: ChatConfig { top_k: 3 },
        })
    }

    fn request(query: &str, topic: Option<&str>, difficulty: Option<&str>) -> ChatRequest {
        ChatRequest {
            query: query.into(),
            topic: topic.map(Into::into),
            difficulty: difficulty.map(Into::into),
        }
    }

    #[test]
    fn missing_query_fails_validation_before_any_retrieval() {
        let err = serde_json::from_value::<ChatRequest>(json!({"topic": "geography"}));
        assert!(err.is_err());
        assert!(err.unwrap_err().to_string().contains("query"));
    }

    #[tokio::test]
    async fn no_match_returns_fixed_apology_and_skips_generation() {
        let retriever = Arc::new(StubRetriever::new(vec![]));
        let st = state(retriever, Arc::new(NeverGenerator));

        let Json(resp) = chat(
            State(st),
            HeaderMap::new(),
            Json(request("অজানা বিষয়", None, None)),
        )
        .await
        .unwrap();

        assert_eq!(resp.answer, NO_MATCH_ANSWER);
    }

    #[tokio::test]
    async fn filtered_out_entries_also_take_the_apology_branch() {
        let retriever = Arc::new(StubRetriever::new(vec![hit(
            "1", "কিছু", "geography", "easy",
        )]));
        let st = state(retriever, Arc::new(NeverGenerator));

        let Json(resp) = chat(
            State(st),
            HeaderMap::new(),
            Json(request("কিছু", Some("nonexistent-topic"), None)),
        )
        .await
        .unwrap();

        assert_eq!(resp.answer, NO_MATCH_ANSWER);
    }

    #[tokio::test]
    async fn context_joins_hits_with_blank_line_in_rank_order() {
        let retriever = Arc::new(StubRetriever::new(vec![
            hit("1", "প্রথম", "t", "easy"),
            hit("2", "দ্বিতীয়", "t", "easy"),
            hit("3", "তৃতীয়", "t", "easy"),
        ]));
        let st = state(retriever, Arc::new(EchoGenerator));

        let Json(resp) = chat(State(st), HeaderMap::new(), Json(request("ক", None, None)))
            .await
            .unwrap();

        assert_eq!(resp.answer, "প্রথম\n\nদ্বিতীয়\n\nতৃতীয়");
    }

    #[tokio::test]
    async fn topic_filter_retrieves_only_matching_entries() {
        // Two entries differing only in topic.
        let retriever = Arc::new(StubRetriever::new(vec![
            hit("1", "ভূগোল তথ্য", "geography", "easy"),
            hit("2", "ইতিহাস তথ্য", "history", "easy"),
        ]));
        let st = state(retriever, Arc::new(EchoGenerator));

        let Json(resp) = chat(
            State(st),
            HeaderMap::new(),
            Json(request("ক", Some("geography"), None)),
        )
        .await
        .unwrap();

        assert_eq!(resp.answer, "ভূগোল তথ্য");
    }

    #[tokio::test]
    async fn default_k_of_three_bounds_retrieval() {
        let retriever = Arc::new(StubRetriever::new(vec![
            hit("1", "a", "t", "e"),
            hit("2", "b", "t", "e"),
            hit("3", "c", "t", "e"),
            hit("4", "d", "t", "e"),
            hit("5", "e", "t", "e"),
        ]));
        let st = state(retriever.clone(), Arc::new(EchoGenerator));

        let Json(resp) = chat(State(st), HeaderMap::new(), Json(request("ক", None, None)))
            .await
            .unwrap();

        assert_eq!(resp.answer, "a\n\nb\n\nc");

        let calls = retriever.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].2, 3);
    }

    #[tokio::test]
    async fn filter_fields_are_forwarded_verbatim() {
        let retriever = Arc::new(StubRetriever::new(vec![]));
        let st = state(retriever.clone(), Arc::new(NeverGenerator));

        let _ = chat(
            State(st),
            HeaderMap::new(),
            Json(request("ক", Some("geography"), Some("easy"))),
        )
        .await
        .unwrap();

        let calls = retriever.calls.lock().unwrap();
        assert_eq!(
            calls[0].1,
            RetrievalFilter {
                topic: Some("geography".into()),
                difficulty: Some("easy".into()),
            }
        );
    }

    #[tokio::test]
    async fn end_to_end_capital_example_echoes_indexed_text() {
        let entry = FaqEntry {
            id: "1".into(),
            question: "What is the capital of Bangladesh?".into(),
            answer: "Dhaka.".into(),
            metadata: FaqMetadata {
                topic: "geography".into(),
                difficulty: "easy".into(),
            },
        };
        let retriever = Arc::new(StubRetriever::new(vec![hit(
            "1",
            &entry.document_text(),
            "geography",
            "easy",
        )]));
        let st = state(retriever, Arc::new(EchoGenerator));

        let Json(resp) = chat(
            State(st),
            HeaderMap::new(),
            Json(request("capital of Bangladesh", Some("geography"), None)),
        )
        .await
        .unwrap();

        assert_eq!(
            resp.answer,
            "প্রশ্ন: What is the capital of Bangladesh?\nউত্তর: Dhaka."
        );
    }

    #[tokio::test]
    async fn identical_requests_give_identical_responses() {
        let retriever = Arc::new(StubRetriever::new(vec![hit("1", "তথ্য", "t", "e")]));
        let st = state(retriever, Arc::new(EchoGenerator));

        let Json(first) = chat(
            State(st.clone()),
            HeaderMap::new(),
            Json(request("ক", None, None)),
        )
        .await
        .unwrap();
        let Json(second) = chat(State(st), HeaderMap::new(), Json(request("ক", None, None)))
            .await
            .unwrap();

        assert_eq!(first.answer, second.answer);
    }
}
