//! Knowledge-base retrieval tool.
//!
//! Queries the injected vector index with the configured result count,
//! filters by the similarity threshold, and renders the surviving documents
//! for the calling agent. Retrieval failures are reported as output strings.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::config::RetrieverConfig;
use crate::errors::ToolkitError;
use crate::retrieval::VectorIndex;
use crate::tools::{question_argument, question_schema, Tool, ToolMetadata};

const TOOL_NAME: &str = "retriever";

pub struct RetrieverTool {
    index: Option<Arc<dyn VectorIndex>>,
    unavailable: String,
    config: RetrieverConfig,
}

impl RetrieverTool {
    pub fn new(index: Arc<dyn VectorIndex>, config: RetrieverConfig) -> Self {
        Self {
            index: Some(index),
            unavailable: String::new(),
            config,
        }
    }

    /// A tool that reports why retrieval is not available instead of querying.
    pub fn unavailable(message: impl Into<String>, config: RetrieverConfig) -> Self {
        Self {
            index: None,
            unavailable: message.into(),
            config,
        }
    }
}

#[async_trait]
impl Tool for RetrieverTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: TOOL_NAME.to_string(),
            description: "Retrieve information from the knowledge base using semantic similarity. Use this when you need information from the available documents.".to_string(),
            input_schema: question_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<String, ToolkitError> {
        let question = question_argument(TOOL_NAME, &arguments)?;

        let Some(index) = &self.index else {
            return Ok(self.unavailable.clone());
        };

        log::info!("Retriever query: '{}', top_k: {}", question, self.config.top_k);

        let results = match index.query(&question, self.config.top_k).await {
            Ok(results) => results,
            Err(e) => return Ok(format!("Error using retriever tool: {}", e)),
        };

        let relevant: Vec<_> = results
            .into_iter()
            .filter(|doc| doc.score >= self.config.score_threshold)
            .collect();

        if relevant.is_empty() {
            return Ok("No relevant documents found for the given query.".to_string());
        }

        let mut response = format!("Found {} relevant documents:\n\n", relevant.len());
        for (i, doc) in relevant.iter().enumerate() {
            response.push_str(&format!("Document {} (Score: {:.3}):\n", i + 1, doc.score));
            response.push_str(&format!("Source: {}\n", doc.source));
            response.push_str(&format!("Content: {}\n\n", doc.content));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::ScoredDocument;
    use serde_json::json;

    struct FixedIndex {
        results: Vec<ScoredDocument>,
        fail: bool,
    }

    #[async_trait]
    impl VectorIndex for FixedIndex {
        async fn query(
            &self,
            _text: &str,
            top_k: usize,
        ) -> Result<Vec<ScoredDocument>, ToolkitError> {
            if self.fail {
                return Err(ToolkitError::RetrievalError("index unreachable".to_string()));
            }
            Ok(self.results.iter().take(top_k).cloned().collect())
        }
    }

    fn tool_with(results: Vec<ScoredDocument>, fail: bool) -> RetrieverTool {
        RetrieverTool::new(
            Arc::new(FixedIndex { results, fail }),
            RetrieverConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_formats_ranked_documents() {
        let tool = tool_with(
            vec![
                ScoredDocument::new("Margin rules overview", "rules.md", 0.92),
                ScoredDocument::new("Settlement schedule", "ops.md", 0.81),
            ],
            false,
        );

        let result = tool.execute(json!({"question": "margin rules"})).await.unwrap();
        assert!(result.contains("Found 2 relevant documents"));
        assert!(result.contains("Source: rules.md"));
        assert!(result.contains("Content: Settlement schedule"));
    }

    #[tokio::test]
    async fn test_threshold_filters_low_scores() {
        let tool = tool_with(
            vec![
                ScoredDocument::new("Barely related", "a.md", 0.31),
                ScoredDocument::new("Not related", "b.md", 0.12),
            ],
            false,
        );

        let result = tool.execute(json!({"question": "margin rules"})).await.unwrap();
        assert_eq!(result, "No relevant documents found for the given query.");
    }

    #[tokio::test]
    async fn test_index_failure_becomes_output_string() {
        let tool = tool_with(Vec::new(), true);

        let result = tool.execute(json!({"question": "anything"})).await.unwrap();
        assert!(result.starts_with("Error using retriever tool:"));
        assert!(result.contains("index unreachable"));
    }

    #[tokio::test]
    async fn test_unavailable_reports_missing_key() {
        let tool = RetrieverTool::unavailable(
            "Error: Pinecone API key not found.",
            RetrieverConfig::default(),
        );

        let result = tool.execute(json!({"question": "anything"})).await.unwrap();
        assert_eq!(result, "Error: Pinecone API key not found.");
    }

    #[tokio::test]
    async fn test_missing_question_is_an_error() {
        let tool = tool_with(Vec::new(), false);
        let result = tool.execute(json!({})).await;
        assert!(result.is_err());
    }
}
