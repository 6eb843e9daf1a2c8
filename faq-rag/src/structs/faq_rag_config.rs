//! Configuration layer: reads runtime settings from environment variables
//! and exposes strongly typed configs for the dataset, embeddings, and Qdrant.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::faq_rag_error::FaqRagError;

/// Distance metric supported by Qdrant for the vector space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum DistanceMetric {
    Cosine,
    Dot,
    Euclid,
}

impl DistanceMetric {
    /// Parse from env string (case-insensitive). Defaults to Cosine.
    pub fn from_env(s: Option<String>) -> Self {
        match s
            .unwrap_or_else(|| "Cosine".to_string())
            .to_lowercase()
            .as_str()
        {
            "cosine" => DistanceMetric::Cosine,
            "dot" | "dotproduct" => DistanceMetric::Dot,
            "euclid" | "l2" => DistanceMetric::Euclid,
            _ => DistanceMetric::Cosine,
        }
    }
}

/// Embedding backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Base URL of the Ollama-compatible embedding endpoint.
    pub url: String,
    /// Embedding model identifier. The served model is the Bengali
    /// sentence-similarity SBERT the dataset was tuned against.
    pub model: String,
    /// Embedding vector dimensionality (768 for the Bengali SBERT).
    pub dim: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".to_string(),
            model: "bengali-sbert".to_string(),
            dim: 768,
            timeout_secs: 60,
        }
    }
}

/// Qdrant connectivity and collection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    /// gRPC URL for Qdrant (e.g., "http://localhost:6334").
    pub url: String,
    /// Collection holding the FAQ index; recreated on every startup.
    pub collection: String,
    /// Vector distance metric (Cosine by default).
    pub distance: DistanceMetric,
    /// Batch size for embed+upsert during the index build.
    pub batch_size: usize,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6334".to_string(),
            collection: "bangla_faq".to_string(),
            distance: DistanceMetric::Cosine,
            batch_size: 64,
        }
    }
}

/// Full configuration for the FAQ retrieval layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqRagConfig {
    /// Path to the static FAQ dataset (JSON array).
    pub faq_path: PathBuf,
    pub embedding: EmbeddingConfig,
    pub qdrant: QdrantConfig,
}

impl FaqRagConfig {
    /// Reads the configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, FaqRagError> {
        let faq_path = std::env::var("FAQ_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/faq.json"));

        let embedding = EmbeddingConfig {
            url: std::env::var("EMBEDDING_URL")
                .unwrap_or_else(|_| "http://localhost:11434".into()),
            model: std::env::var("EMBEDDING_MODEL").unwrap_or_else(|_| "bengali-sbert".into()),
            dim: read_usize_env("EMBEDDING_DIM")?.unwrap_or(768),
            timeout_secs: read_u64_env("EMBEDDING_TIMEOUT_SECS")?.unwrap_or(60),
        };

        let qdrant = QdrantConfig {
            url: std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6334".into()),
            collection: std::env::var("QDRANT_COLLECTION")
                .unwrap_or_else(|_| "bangla_faq".into()),
            distance: DistanceMetric::from_env(std::env::var("QDRANT_DISTANCE").ok()),
            batch_size: read_usize_env("QDRANT_BATCH_SIZE")?.unwrap_or(64),
        };

        if embedding.dim == 0 {
            return Err(FaqRagError::InvalidConfig(
                "EMBEDDING_DIM must be > 0".into(),
            ));
        }
        if qdrant.batch_size == 0 {
            return Err(FaqRagError::InvalidConfig(
                "QDRANT_BATCH_SIZE must be > 0".into(),
            ));
        }

        Ok(Self {
            faq_path,
            embedding,
            qdrant,
        })
    }
}

fn read_usize_env(key: &str) -> Result<Option<usize>, FaqRagError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => {
            v.parse::<usize>()
                .map(Some)
                .map_err(|_| FaqRagError::EnvParse {
                    key: key.to_string(),
                    value: v,
                })
        }
        _ => Ok(None),
    }
}

fn read_u64_env(key: &str) -> Result<Option<u64>, FaqRagError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => {
            v.parse::<u64>()
                .map(Some)
                .map_err(|_| FaqRagError::EnvParse {
                    key: key.to_string(),
                    value: v,
                })
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_metric_parses_known_names() {
        assert_eq!(
            DistanceMetric::from_env(Some("dot".into())),
            DistanceMetric::Dot
        );
        assert_eq!(
            DistanceMetric::from_env(Some("L2".into())),
            DistanceMetric::Euclid
        );
        assert_eq!(DistanceMetric::from_env(None), DistanceMetric::Cosine);
        assert_eq!(
            DistanceMetric::from_env(Some("something-else".into())),
            DistanceMetric::Cosine
        );
    }
}
