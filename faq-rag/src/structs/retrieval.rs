//! Retrieval-side data types: the typed metadata filter, the payload stored
//! alongside each vector, and the hit shape returned to callers.

use qdrant_client::qdrant::{Condition, FieldCondition, Filter, Match};
use serde::{Deserialize, Serialize};

/// Closed set of optional exact-match filter fields.
///
/// A present field requires indexed documents to match it exactly; multiple
/// present fields combine with logical AND. Both absent means no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalFilter {
    pub topic: Option<String>,
    pub difficulty: Option<String>,
}

impl RetrievalFilter {
    pub fn is_empty(&self) -> bool {
        self.topic.is_none() && self.difficulty.is_none()
    }

    /// Builds the equivalent Qdrant filter, or `None` when no field is set.
    pub(crate) fn to_qdrant(&self) -> Option<Filter> {
        let mut must: Vec<Condition> = Vec::new();

        if let Some(topic) = &self.topic {
            must.push(keyword_condition("topic", topic));
        }
        if let Some(difficulty) = &self.difficulty {
            must.push(keyword_condition("difficulty", difficulty));
        }

        if must.is_empty() {
            return None;
        }

        Some(Filter {
            must,
            ..Default::default()
        })
    }
}

fn keyword_condition(key: &str, value: &str) -> Condition {
    Condition {
        condition_one_of: Some(qdrant_client::qdrant::condition::ConditionOneOf::Field(
            FieldCondition {
                key: key.to_string(),
                r#match: Some(Match {
                    match_value: Some(qdrant_client::qdrant::r#match::MatchValue::Keyword(
                        value.to_string(),
                    )),
                }),
                ..Default::default()
            },
        )),
    }
}

/// Payload stored alongside the vector in Qdrant, one per FAQ entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqPayload {
    /// FAQ entry id (dataset `id` field; the point id is the row index).
    pub id: String,
    pub topic: String,
    pub difficulty: String,
    /// The Bangla-labeled question+answer text that was embedded.
    pub text: String,
}

/// A single retrieval hit, ranked by the index's distance metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedFaq {
    pub score: f32,
    pub id: String,
    pub text: String,
    pub topic: String,
    pub difficulty: String,
}
