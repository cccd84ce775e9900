//! Vector-index retrieval for knowledge-base search
//!
//! This module defines the seam between the retriever tool and the backing
//! vector database. The hosted index is reached over REST; an in-memory
//! implementation backs tests and offline use. Similarity search itself is
//! performed by the backend; locally only embedding generation, score
//! filtering, and ranking glue live here.

use async_trait::async_trait;

use crate::errors::ToolkitError;

pub mod embeddings;
pub mod pinecone;

pub use embeddings::{
    cosine_similarity, DummyEmbeddingGenerator, EmbeddingGenerator, RestEmbeddingClient,
};
pub use pinecone::PineconeIndex;

/// A document returned from a similarity search, ranked by score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub content: String,
    pub source: String,
    pub score: f32,
}

impl ScoredDocument {
    pub fn new(content: impl Into<String>, source: impl Into<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
            score,
        }
    }
}

/// Query interface over a vector index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return up to `top_k` documents ranked by descending similarity score.
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<ScoredDocument>, ToolkitError>;
}

/// In-memory index ranking documents by cosine similarity of their embeddings.
pub struct InMemoryIndex {
    embedder: std::sync::Arc<dyn EmbeddingGenerator>,
    entries: std::sync::RwLock<Vec<IndexedDocument>>,
}

struct IndexedDocument {
    content: String,
    source: String,
    embedding: Vec<f32>,
}

impl InMemoryIndex {
    pub fn new(embedder: std::sync::Arc<dyn EmbeddingGenerator>) -> Self {
        Self {
            embedder,
            entries: std::sync::RwLock::new(Vec::new()),
        }
    }

    pub async fn add_document(
        &self,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), ToolkitError> {
        let content = content.into();
        let embedding = self.embedder.generate_embedding(&content).await?;

        let mut entries = self.entries.write().expect("index lock poisoned");
        entries.push(IndexedDocument {
            content,
            source: source.into(),
            embedding,
        });
        Ok(())
    }

    pub fn document_count(&self) -> usize {
        self.entries.read().expect("index lock poisoned").len()
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<ScoredDocument>, ToolkitError> {
        let query_embedding = self.embedder.generate_embedding(text).await?;

        let entries = self.entries.read().expect("index lock poisoned");
        let mut results: Vec<ScoredDocument> = entries
            .iter()
            .map(|doc| {
                ScoredDocument::new(
                    doc.content.clone(),
                    doc.source.clone(),
                    cosine_similarity(&query_embedding, &doc.embedding),
                )
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        Ok(results)
    }
}
