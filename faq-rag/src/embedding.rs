//! Ollama-compatible embedding client.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::errors::faq_rag_error::FaqRagError;
use crate::structs::faq_rag_config::FaqRagConfig;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Embed texts via the configured `/api/embeddings` endpoint.
///
/// Each returned vector must match the configured dimensionality; a mismatch
/// means the wrong model is being served and is reported as an error rather
/// than silently indexed.
pub async fn embed_texts(
    cfg: &FaqRagConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>, FaqRagError> {
    let url = format!("{}/api/embeddings", cfg.embedding.url.trim_end_matches('/'));
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.embedding.timeout_secs))
        .build()
        .map_err(|e| FaqRagError::Embedding(format!("http client build: {e}")))?;

    let mut out = Vec::with_capacity(texts.len());

    for text in texts {
        let req = EmbedRequest {
            model: &cfg.embedding.model,
            prompt: text,
        };

        let resp = client
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| FaqRagError::Embedding(format!("POST {url}: {e}")))?;

        if resp.status() != StatusCode::OK {
            let code = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".into());
            return Err(FaqRagError::Embedding(format!(
                "embeddings endpoint non-200: {code}; body: {body}"
            )));
        }

        let parsed: EmbedResponse = resp
            .json()
            .await
            .map_err(|e| FaqRagError::Embedding(format!("parse embeddings json: {e}")))?;

        if parsed.embedding.len() != cfg.embedding.dim {
            return Err(FaqRagError::Embedding(format!(
                "embedding dim {} != expected {} (model: {})",
                parsed.embedding.len(),
                cfg.embedding.dim,
                cfg.embedding.model
            )));
        }

        out.push(parsed.embedding);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_response_decodes_expected_shape() {
        let parsed: EmbedResponse =
            serde_json::from_str(r#"{"embedding":[0.1,-0.2,0.3]}"#).unwrap();
        assert_eq!(parsed.embedding, vec![0.1, -0.2, 0.3]);
    }
}
