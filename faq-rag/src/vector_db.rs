//! Qdrant vector DB helpers: connection lifecycle, collection reset,
//! batched upserts, and filtered top-K search.
//!
//! This module does not read the dataset or create embeddings, only DB I/O.
//! Point ids are the dataset row index; the FAQ `id` lives in the payload.

use qdrant_client::qdrant::{
    CreateCollectionBuilder, CreateFieldIndexCollectionBuilder, Distance, FieldType, Filter,
    PointStruct, SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use serde_json::json;

use crate::errors::faq_rag_error::FaqRagError;
use crate::structs::faq_rag_config::{DistanceMetric, FaqRagConfig};
use crate::structs::retrieval::{FaqPayload, RetrievedFaq};

/// Establish a gRPC connection to Qdrant using `cfg.qdrant.url`.
///
/// # Errors
/// Returns `FaqRagError::Qdrant` if the client cannot be constructed.
pub async fn connect(cfg: &FaqRagConfig) -> Result<Qdrant, FaqRagError> {
    Qdrant::from_url(&cfg.qdrant.url)
        .build()
        .map_err(|e| FaqRagError::Qdrant(format!("client build: {e}")))
}

/// Drop the collection (if present), create a new one with the configured
/// dim/distance, and add keyword payload indexes for the filterable fields.
///
/// # Errors
/// Returns `FaqRagError::Qdrant` on transport/server failures when creating.
pub async fn reset_collection(client: &Qdrant, cfg: &FaqRagConfig) -> Result<(), FaqRagError> {
    // Best-effort delete: ignore errors (e.g., not found) to keep idempotency.
    let _ = client.delete_collection(&cfg.qdrant.collection).await;

    let distance = match cfg.qdrant.distance {
        DistanceMetric::Cosine => Distance::Cosine,
        DistanceMetric::Dot => Distance::Dot,
        DistanceMetric::Euclid => Distance::Euclid,
    };

    client
        .create_collection(
            CreateCollectionBuilder::new(&cfg.qdrant.collection)
                .vectors_config(VectorParamsBuilder::new(cfg.embedding.dim as u64, distance)),
        )
        .await
        .map_err(|e| FaqRagError::Qdrant(format!("create_collection: {e}")))?;

    for field in ["topic", "difficulty"] {
        client
            .create_field_index(CreateFieldIndexCollectionBuilder::new(
                &cfg.qdrant.collection,
                field,
                FieldType::Keyword,
            ))
            .await
            .map_err(|e| FaqRagError::Qdrant(format!("create_field_index {field}: {e}")))?;
    }

    Ok(())
}

fn payload_to_qdrant(payload: &FaqPayload) -> Result<Payload, FaqRagError> {
    let as_json = json!({
        "id": payload.id,
        "topic": payload.topic,
        "difficulty": payload.difficulty,
        "text": payload.text,
    });
    as_json
        .try_into()
        .map_err(|e| FaqRagError::Qdrant(format!("payload convert: {e}")))
}

/// Upsert a batch of points: `(row_id, vector, payload)`.
///
/// The vector length must equal `cfg.embedding.dim`.
/// Returns the number of upserted points.
pub async fn upsert_batch(
    client: &Qdrant,
    cfg: &FaqRagConfig,
    batch: Vec<(u64, Vec<f32>, FaqPayload)>,
) -> Result<usize, FaqRagError> {
    if batch.is_empty() {
        return Ok(0);
    }

    let dim = cfg.embedding.dim;
    let mut points: Vec<PointStruct> = Vec::with_capacity(batch.len());

    for (row_id, vector, payload) in batch {
        if vector.len() != dim {
            return Err(FaqRagError::InvalidConfig(format!(
                "vector length {} != EMBEDDING_DIM {} for entry {}",
                vector.len(),
                dim,
                payload.id
            )));
        }

        let q_payload = payload_to_qdrant(&payload)?;
        points.push(PointStruct::new(row_id, vector, q_payload));
    }

    let point_len = points.len();

    client
        .upsert_points(UpsertPointsBuilder::new(&cfg.qdrant.collection, points))
        .await
        .map_err(|e| FaqRagError::Qdrant(format!("upsert_points: {e}")))?;

    Ok(point_len)
}

/// Run k-NN search for a query vector with an optional payload filter and
/// map results into [`RetrievedFaq`] hits.
///
/// # Errors
/// - `InvalidConfig` if the query vector length mismatches `EMBEDDING_DIM`.
/// - `Qdrant` on transport/server errors.
pub async fn search_top_k(
    client: &Qdrant,
    cfg: &FaqRagConfig,
    query_vec: Vec<f32>,
    k: usize,
    filter: Option<Filter>,
) -> Result<Vec<RetrievedFaq>, FaqRagError> {
    if query_vec.len() != cfg.embedding.dim {
        return Err(FaqRagError::InvalidConfig(format!(
            "query vector length {} != EMBEDDING_DIM {}",
            query_vec.len(),
            cfg.embedding.dim
        )));
    }

    let mut builder = SearchPointsBuilder::new(&cfg.qdrant.collection, query_vec, k as u64)
        .with_payload(true);

    if let Some(f) = filter {
        builder = builder.filter(f);
    }

    let resp = client
        .search_points(builder)
        .await
        .map_err(|e| FaqRagError::Qdrant(format!("search_points: {e}")))?;

    let hits = resp
        .result
        .into_iter()
        .map(map_scored_point_to_hit)
        .collect::<Vec<_>>();

    Ok(hits)
}

/// Map a `ScoredPoint` into [`RetrievedFaq`], extracting payload best-effort.
fn map_scored_point_to_hit(sp: qdrant_client::qdrant::ScoredPoint) -> RetrievedFaq {
    let mut id = String::new();
    let mut topic = String::new();
    let mut difficulty = String::new();
    let mut text = String::new();

    for (key, slot) in [
        ("id", &mut id),
        ("topic", &mut topic),
        ("difficulty", &mut difficulty),
        ("text", &mut text),
    ] {
        if let Some(v) = sp.payload.get(key) {
            if let Some(s) = v.clone().into_json().as_str() {
                *slot = s.to_owned();
            }
        }
    }

    RetrievedFaq {
        score: sp.score,
        id,
        text,
        topic,
        difficulty,
    }
}
