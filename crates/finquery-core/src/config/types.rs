//! Configuration type definitions
//!
//! The configuration is loaded once at process start, validated, and treated
//! as read-only thereafter. Tools receive the sections they need by reference
//! at construction time; there is no hidden process-wide configuration state.

use serde::{Deserialize, Serialize};

use crate::errors::ToolkitError;

/// Top-level configuration for the tool facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolkitConfig {
    #[serde(default)]
    pub vector_db: VectorDbConfig,
    #[serde(default)]
    pub retriever: RetrieverConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            vector_db: VectorDbConfig::default(),
            retriever: RetrieverConfig::default(),
            tools: ToolsConfig::default(),
            embeddings: EmbeddingsConfig::default(),
        }
    }
}

impl ToolkitConfig {
    /// Validate cross-field constraints after deserialization.
    pub fn validate(&self) -> Result<(), ToolkitError> {
        if self.vector_db.index_name.trim().is_empty() {
            return Err(ToolkitError::ConfigError(
                "vector_db.index_name must not be empty".to_string(),
            ));
        }

        if self.retriever.top_k == 0 {
            return Err(ToolkitError::ConfigError(
                "retriever.top_k must be at least 1".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.retriever.score_threshold) {
            return Err(ToolkitError::ConfigError(format!(
                "retriever.score_threshold must be within [0.0, 1.0], got {}",
                self.retriever.score_threshold
            )));
        }

        if self.tools.tavily.max_results == 0 || self.tools.tavily.max_results > 10 {
            return Err(ToolkitError::ConfigError(format!(
                "tools.tavily.max_results must be between 1 and 10, got {}",
                self.tools.tavily.max_results
            )));
        }

        if self.tools.polygon.base_url.trim().is_empty() {
            return Err(ToolkitError::ConfigError(
                "tools.polygon.base_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Vector database (hosted index) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    #[serde(default = "default_index_name")]
    pub index_name: String,
    /// Index endpoint host. May also be supplied via `PINECONE_INDEX_HOST`.
    #[serde(default)]
    pub host: Option<String>,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            index_name: default_index_name(),
            host: None,
        }
    }
}

/// Retriever search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieverConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f32,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            score_threshold: default_score_threshold(),
        }
    }
}

/// Per-tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub tavily: TavilyConfig,
    #[serde(default)]
    pub polygon: PolygonConfig,
}

/// Web search (Tavily) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TavilyConfig {
    #[serde(default = "default_max_search_results")]
    pub max_results: usize,
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_search_results(),
        }
    }
}

/// Financial data (Polygon) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonConfig {
    /// Overridable for tests and proxies.
    #[serde(default = "default_polygon_base_url")]
    pub base_url: String,
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self {
            base_url: default_polygon_base_url(),
        }
    }
}

/// Embedding backend configuration for the retriever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    #[serde(default = "default_embeddings_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_embedding_model")]
    pub model_name: String,
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_embeddings_base_url(),
            model_name: default_embedding_model(),
            dimension: default_embedding_dimension(),
        }
    }
}

fn default_index_name() -> String {
    "finquery-kb".to_string()
}

fn default_top_k() -> usize {
    10
}

fn default_score_threshold() -> f32 {
    0.5
}

fn default_max_search_results() -> usize {
    5
}

fn default_polygon_base_url() -> String {
    "https://api.polygon.io".to_string()
}

fn default_embeddings_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_embedding_dimension() -> usize {
    1536
}
