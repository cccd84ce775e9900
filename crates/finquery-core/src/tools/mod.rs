//! Tool facade for the agent runtime
//!
//! Each remote capability is exposed as a self-contained callable with a
//! fixed textual description the calling agent uses to decide when to invoke
//! it. Tools are independent across invocations: no state is shared between
//! calls beyond the read-only configuration and clients injected at
//! construction. The facade's single failure-handling policy is that remote
//! faults are caught and returned as human-readable strings; `Err` is
//! reserved for contract violations by the caller.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ToolkitConfig;
use crate::errors::ToolkitError;
use crate::polygon::{CapabilitySet, PolygonClient};
use crate::retrieval::{PineconeIndex, RestEmbeddingClient};
use crate::session::{resolve_credential, SessionStore};

pub mod market_data;
pub mod retriever;
pub mod web_search;

pub use market_data::MarketDataTool;
pub use retriever::RetrieverTool;
pub use web_search::WebSearchTool;

/// Description of a tool, consumed by the calling agent runtime.
#[derive(Debug, Clone, Serialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

// Core Tool trait that all tools must implement
#[async_trait]
pub trait Tool: Send + Sync {
    fn metadata(&self) -> ToolMetadata;
    async fn execute(&self, arguments: Value) -> Result<String, ToolkitError>;
}

/// Pull the required `question` argument out of a tool call.
///
/// A missing or empty question is a caller contract violation, the one
/// failure mode reported as `Err` rather than an output string.
pub(crate) fn question_argument(tool_name: &str, arguments: &Value) -> Result<String, ToolkitError> {
    let question = arguments
        .get("question")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolkitError::ToolError {
            tool_name: tool_name.to_string(),
            message: "Missing required parameter: question".to_string(),
        })?;

    if question.trim().is_empty() {
        return Err(ToolkitError::ToolError {
            tool_name: tool_name.to_string(),
            message: "Question cannot be empty".to_string(),
        });
    }

    Ok(question.to_string())
}

pub(crate) fn question_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "question": {
                "type": "string",
                "description": "The natural-language question to handle"
            }
        },
        "required": ["question"]
    })
}

// Tool registry for managing multiple tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register_tool(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.metadata().name.clone();
        self.tools.insert(name, tool);
    }

    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list_tools(&self) -> Vec<ToolMetadata> {
        self.tools.values().map(|tool| tool.metadata()).collect()
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Tool factory wiring configuration and credentials into concrete tools
pub struct ToolFactory;

impl ToolFactory {
    /// Build the retriever tool, resolving the index key and host up front.
    pub fn create_retriever(config: &ToolkitConfig, session: &SessionStore) -> Arc<dyn Tool> {
        let Some(api_key) = resolve_credential("PINECONE_API_KEY", session) else {
            return Arc::new(RetrieverTool::unavailable(
                "Error: Pinecone API key not found.",
                config.retriever.clone(),
            ));
        };

        let host = resolve_credential("PINECONE_INDEX_HOST", session)
            .or_else(|| config.vector_db.host.clone());
        let Some(host) = host else {
            return Arc::new(RetrieverTool::unavailable(
                "Error: vector index host not configured.",
                config.retriever.clone(),
            ));
        };

        let embedder = Arc::new(RestEmbeddingClient::new(
            config.embeddings.clone(),
            resolve_credential("OPENAI_API_KEY", session),
        ));
        let index = Arc::new(PineconeIndex::new(host, api_key, embedder));

        Arc::new(RetrieverTool::new(index, config.retriever.clone()))
    }

    pub fn create_web_search(config: &ToolkitConfig, session: &SessionStore) -> Arc<dyn Tool> {
        Arc::new(WebSearchTool::new(
            resolve_credential("TAVILY_API_KEY", session),
            config.tools.tavily.max_results,
        ))
    }

    /// Build the market-data tool against the live Polygon backend.
    pub fn create_market_data(config: &ToolkitConfig, session: &SessionStore) -> Arc<dyn Tool> {
        match resolve_credential("POLYGON_API_KEY", session) {
            Some(api_key) => {
                let client = Arc::new(PolygonClient::new(api_key, &config.tools.polygon.base_url));
                Arc::new(MarketDataTool::new(client, CapabilitySet::full()))
            }
            None => Arc::new(MarketDataTool::unconfigured()),
        }
    }

    /// Registry holding all three facades.
    pub fn create_default_registry(config: &ToolkitConfig, session: &SessionStore) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register_tool(Self::create_retriever(config, session));
        registry.register_tool(Self::create_web_search(config, session));
        registry.register_tool(Self::create_market_data(config, session));
        registry
    }
}
