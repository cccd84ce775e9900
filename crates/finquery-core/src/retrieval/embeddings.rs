//! Embedding generation for vector-index queries.
//!
//! Queries against the hosted index need an embedding of the question text.
//! The REST client targets an OpenAI-compatible embeddings endpoint; the
//! dummy generator produces deterministic hash-based vectors for tests.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::EmbeddingsConfig;
use crate::errors::ToolkitError;

#[async_trait]
pub trait EmbeddingGenerator: Send + Sync {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, ToolkitError>;

    fn embedding_dimension(&self) -> usize;
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

/// Deterministic hash-based embeddings for tests and offline use.
pub struct DummyEmbeddingGenerator {
    embedding_dimension: usize,
}

impl DummyEmbeddingGenerator {
    pub fn new() -> Self {
        Self {
            embedding_dimension: 384,
        }
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            embedding_dimension: dimension,
        }
    }
}

impl Default for DummyEmbeddingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingGenerator for DummyEmbeddingGenerator {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, ToolkitError> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let hash = hasher.finish();

        let mut embedding = vec![0.0; self.embedding_dimension];
        for (i, value) in embedding.iter_mut().enumerate() {
            let seed = hash.wrapping_add(i as u64);
            *value = ((seed % 1000) as f32 - 500.0) / 500.0;
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn embedding_dimension(&self) -> usize {
        self.embedding_dimension
    }
}

/// REST client for an OpenAI-compatible embeddings endpoint.
pub struct RestEmbeddingClient {
    client: Client,
    config: EmbeddingsConfig,
    api_key: Option<String>,
}

impl RestEmbeddingClient {
    pub fn new(config: EmbeddingsConfig, api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
            api_key,
        }
    }

    pub fn config(&self) -> &EmbeddingsConfig {
        &self.config
    }
}

#[async_trait]
impl EmbeddingGenerator for RestEmbeddingClient {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, ToolkitError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            ToolkitError::RetrievalError("Embedding API key not configured".to_string())
        })?;

        let url = format!("{}/embeddings", self.config.api_base_url.trim_end_matches('/'));
        let payload = json!({
            "model": self.config.model_name,
            "input": [text],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                ToolkitError::RetrievalError(format!("Embedding API request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(ToolkitError::RetrievalError(format!(
                "Embedding API returned status {}",
                response.status()
            )));
        }

        let data: Value = response.json().await.map_err(|e| {
            ToolkitError::RetrievalError(format!("Failed to parse embedding response: {}", e))
        })?;

        let embedding = data["data"][0]["embedding"]
            .as_array()
            .ok_or_else(|| {
                ToolkitError::RetrievalError(
                    "Embedding response missing data[0].embedding".to_string(),
                )
            })?
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect();

        Ok(embedding)
    }

    fn embedding_dimension(&self) -> usize {
        self.config.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        let c = vec![0.0, 1.0, 0.0];

        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);
        assert!((cosine_similarity(&a, &c) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_mismatched_lengths() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[tokio::test]
    async fn test_dummy_embedding_generator_is_deterministic() {
        let generator = DummyEmbeddingGenerator::new();

        let text = "Test text for embedding";
        let embedding = generator.generate_embedding(text).await.unwrap();
        assert_eq!(embedding.len(), 384);

        let embedding2 = generator.generate_embedding(text).await.unwrap();
        assert_eq!(embedding, embedding2);

        let embedding3 = generator.generate_embedding("Different text").await.unwrap();
        assert_ne!(embedding, embedding3);
    }

    #[tokio::test]
    async fn test_dummy_embedding_is_normalized() {
        let generator = DummyEmbeddingGenerator::with_dimension(16);
        let embedding = generator.generate_embedding("anything").await.unwrap();
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_rest_client_requires_api_key() {
        let client = RestEmbeddingClient::new(EmbeddingsConfig::default(), None);
        assert_eq!(client.embedding_dimension(), 1536);

        let result = client.generate_embedding("anything").await;
        assert!(matches!(result, Err(ToolkitError::RetrievalError(_))));
    }
}
