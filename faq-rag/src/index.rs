//! The FAQ similarity index and the retrieval seam exposed to the HTTP layer.

use std::time::Instant;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use tracing::info;

use crate::embedding::embed_texts;
use crate::errors::faq_rag_error::FaqRagError;
use crate::faq_loader::load_faq;
use crate::structs::faq_entry::FaqEntry;
use crate::structs::faq_rag_config::FaqRagConfig;
use crate::structs::retrieval::{FaqPayload, RetrievalFilter, RetrievedFaq};
use crate::vector_db::{connect, reset_collection, search_top_k, upsert_batch};

/// Retrieval seam used by the request handler.
///
/// Ranking is delegated entirely to the index's distance metric; no custom
/// scoring, re-ranking, or deduplication happens behind this trait. An empty
/// result is `Ok(vec![])`, not an error.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(
        &self,
        query: &str,
        filter: &RetrievalFilter,
        k: usize,
    ) -> Result<Vec<RetrievedFaq>, FaqRagError>;
}

/// Similarity index over the static FAQ dataset.
///
/// Built once per process; shared read-only across requests afterwards. The
/// index always reflects exactly the dataset present at build time — any
/// dataset change requires a full rebuild (process restart).
pub struct FaqIndex {
    client: Qdrant,
    cfg: FaqRagConfig,
}

impl FaqIndex {
    /// Build a fresh index: load the dataset, drop+create the collection,
    /// embed every entry's document text, and upsert in batches.
    pub async fn build_fresh(cfg: FaqRagConfig) -> Result<Self, FaqRagError> {
        info!(
            target: "faq_rag::index",
            path = %cfg.faq_path.display(),
            collection = %cfg.qdrant.collection,
            "build_fresh: start"
        );

        let entries = load_faq(&cfg.faq_path).await?;

        let client = connect(&cfg).await?;
        reset_collection(&client, &cfg).await?;

        let started = Instant::now();
        let mut indexed = 0usize;

        for (chunk_idx, chunk) in entries.chunks(cfg.qdrant.batch_size).enumerate() {
            let texts: Vec<String> = chunk.iter().map(FaqEntry::document_text).collect();
            let vectors = embed_texts(&cfg, &texts).await?;

            let base = chunk_idx * cfg.qdrant.batch_size;
            let points = chunk
                .iter()
                .zip(texts)
                .zip(vectors)
                .enumerate()
                .map(|(offset, ((entry, text), vector))| {
                    let payload = FaqPayload {
                        id: entry.id.clone(),
                        topic: entry.metadata.topic.clone(),
                        difficulty: entry.metadata.difficulty.clone(),
                        text,
                    };
                    ((base + offset) as u64, vector, payload)
                })
                .collect::<Vec<_>>();

            indexed += upsert_batch(&client, &cfg, points).await?;
        }

        info!(
            target: "faq_rag::index",
            indexed,
            duration_ms = started.elapsed().as_millis() as u64,
            "build_fresh: finished"
        );

        Ok(Self { client, cfg })
    }
}

#[async_trait]
impl Retriever for FaqIndex {
    async fn retrieve(
        &self,
        query: &str,
        filter: &RetrievalFilter,
        k: usize,
    ) -> Result<Vec<RetrievedFaq>, FaqRagError> {
        let query_vecs = embed_texts(&self.cfg, &[query.to_string()]).await?;
        let query_vec = query_vecs
            .into_iter()
            .next()
            .ok_or_else(|| FaqRagError::Embedding("empty embedding response".into()))?;

        let hits = search_top_k(&self.client, &self.cfg, query_vec, k, filter.to_qdrant()).await?;

        info!(
            target: "faq_rag::retrieve",
            hits = hits.len(),
            k,
            filtered = !filter.is_empty(),
            "retrieve: done"
        );

        Ok(hits)
    }
}
