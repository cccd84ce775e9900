//! Web search tool backed by the Tavily API.
//!
//! The request always asks for advanced search depth with the answer and raw
//! content included; the response body is returned to the caller verbatim.
//! Every failure, including a missing API key, surfaces as an output string.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::errors::ToolkitError;
use crate::tools::{question_argument, question_schema, Tool, ToolMetadata};

const TOOL_NAME: &str = "tavily_search";
const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

pub struct WebSearchTool {
    client: Client,
    api_key: Option<String>,
    max_results: usize,
    endpoint: String,
}

impl WebSearchTool {
    pub fn new(api_key: Option<String>, max_results: usize) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            max_results,
            endpoint: TAVILY_ENDPOINT.to_string(),
        }
    }

    /// Point the tool at a different endpoint, for tests and proxies.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn failure(detail: impl std::fmt::Display) -> String {
        format!(
            "Error using Tavily search: {}. Please ensure the Tavily API key is valid and the service is available.",
            detail
        )
    }

    async fn search(&self, question: &str, api_key: &str) -> Result<String, ToolkitError> {
        let payload = json!({
            "api_key": api_key,
            "query": question,
            "search_depth": "advanced",
            "include_answer": true,
            "include_raw_content": true,
            "max_results": self.max_results,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ToolkitError::ToolError {
                tool_name: TOOL_NAME.to_string(),
                message: format!("Tavily API request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolkitError::ToolError {
                tool_name: TOOL_NAME.to_string(),
                message: format!("Tavily API returned status {}", status),
            });
        }

        response.text().await.map_err(|e| ToolkitError::ToolError {
            tool_name: TOOL_NAME.to_string(),
            message: format!("Failed to read Tavily response: {}", e),
        })
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: TOOL_NAME.to_string(),
            description: "Search the web for recent or specific information using Tavily.".to_string(),
            input_schema: question_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<String, ToolkitError> {
        let question = question_argument(TOOL_NAME, &arguments)?;

        let Some(api_key) = &self.api_key else {
            return Ok(Self::failure("Tavily API key not configured"));
        };

        log::info!("Web search: '{}' (max_results: {})", question, self.max_results);

        match self.search(&question, api_key).await {
            Ok(payload) => Ok(payload),
            Err(e) => Ok(Self::failure(e)),
        }
    }
}
