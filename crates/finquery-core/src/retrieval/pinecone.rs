//! REST client for a hosted Pinecone-style vector index.
//!
//! Similarity search runs on the backend: the client embeds the query text,
//! POSTs the vector to the index's `/query` endpoint, and maps the returned
//! matches into `ScoredDocument`s. Document text and provenance are expected
//! in the match metadata under `text` and `source`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ToolkitError;
use crate::retrieval::{EmbeddingGenerator, ScoredDocument, VectorIndex};

pub struct PineconeIndex {
    client: Client,
    host: String,
    api_key: String,
    embedder: Arc<dyn EmbeddingGenerator>,
}

impl PineconeIndex {
    pub fn new(
        host: impl Into<String>,
        api_key: impl Into<String>,
        embedder: Arc<dyn EmbeddingGenerator>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            host: host.into(),
            api_key: api_key.into(),
            embedder,
        }
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.host.trim_end_matches('/'))
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<ScoredDocument>, ToolkitError> {
        let vector = self.embedder.generate_embedding(text).await?;

        let payload = json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true,
        });

        let response = self
            .client
            .post(self.query_url())
            .header("Api-Key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                ToolkitError::RetrievalError(format!("Vector index request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(ToolkitError::RetrievalError(format!(
                "Vector index returned status {}",
                response.status()
            )));
        }

        let data: Value = response.json().await.map_err(|e| {
            ToolkitError::RetrievalError(format!("Failed to parse vector index response: {}", e))
        })?;

        let mut results = Vec::new();
        if let Some(matches) = data["matches"].as_array() {
            for entry in matches {
                let score = entry["score"].as_f64().unwrap_or(0.0) as f32;
                let content = entry["metadata"]["text"].as_str().unwrap_or("").to_string();
                let source = entry["metadata"]["source"]
                    .as_str()
                    .or_else(|| entry["id"].as_str())
                    .unwrap_or("unknown")
                    .to_string();

                results.push(ScoredDocument::new(content, source, score));
            }
        }

        log::debug!(
            "Vector index query returned {} match(es) for top_k {}",
            results.len(),
            top_k
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::DummyEmbeddingGenerator;

    #[test]
    fn test_query_url_strips_trailing_slash() {
        let index = PineconeIndex::new(
            "https://kb-1a2b.svc.example.io/",
            "key",
            Arc::new(DummyEmbeddingGenerator::new()),
        );
        assert_eq!(index.query_url(), "https://kb-1a2b.svc.example.io/query");
    }

    #[tokio::test]
    async fn test_query_against_unreachable_host_is_a_retrieval_error() {
        let index = PineconeIndex::new(
            "http://127.0.0.1:1",
            "key",
            Arc::new(DummyEmbeddingGenerator::new()),
        );
        let result = index.query("question", 3).await;
        assert!(matches!(result, Err(ToolkitError::RetrievalError(_))));
    }
}
