//! Financial market-data tool.
//!
//! Routes each question to exactly one provider operation and catches every
//! remote failure as a human-readable output string that names the ticker,
//! so the calling agent can relay it or retry with a different phrasing.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::errors::ToolkitError;
use crate::polygon::{route_query, CapabilitySet, MarketDataProvider, RouteDecision};
use crate::tools::{question_argument, question_schema, Tool, ToolMetadata};

const TOOL_NAME: &str = "polygon_market_data";

const NO_TICKER_MESSAGE: &str =
    "No stock ticker found in query. Please specify a stock symbol like AAPL, GOOGL, etc.";

pub struct MarketDataTool {
    provider: Option<Arc<dyn MarketDataProvider>>,
    capabilities: CapabilitySet,
}

impl MarketDataTool {
    pub fn new(provider: Arc<dyn MarketDataProvider>, capabilities: CapabilitySet) -> Self {
        Self {
            provider: Some(provider),
            capabilities,
        }
    }

    /// A tool with no backend, reporting the missing credential on every call.
    pub fn unconfigured() -> Self {
        Self {
            provider: None,
            capabilities: CapabilitySet::none(),
        }
    }
}

#[async_trait]
impl Tool for MarketDataTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: TOOL_NAME.to_string(),
            description: "Get financial data about stocks: recent news, financial statements, and historical price aggregates. Mention a stock ticker symbol in the question.".to_string(),
            input_schema: question_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<String, ToolkitError> {
        let question = question_argument(TOOL_NAME, &arguments)?;

        let Some(provider) = &self.provider else {
            return Ok("Error: Polygon API key not found.".to_string());
        };

        match route_query(&question, &self.capabilities) {
            RouteDecision::NoTicker => Ok(NO_TICKER_MESSAGE.to_string()),
            RouteDecision::News { ticker } => match provider.ticker_news(&ticker).await {
                Ok(payload) => Ok(payload),
                Err(e) => Ok(format!("Error getting news for {}: {}", ticker, e)),
            },
            RouteDecision::Financials { ticker } => {
                match provider.ticker_financials(&ticker).await {
                    Ok(payload) => Ok(payload),
                    Err(e) => Ok(format!("Error getting financials for {}: {}", ticker, e)),
                }
            }
            RouteDecision::Aggregates(params) => {
                let ticker = params.ticker.clone();
                match provider.aggregates(&params).await {
                    Ok(payload) => Ok(payload),
                    Err(e) => Ok(format!("Error getting price data for {}: {}", ticker, e)),
                }
            }
            RouteDecision::Unroutable { ticker } => Ok(format!(
                "Unable to process financial query for {}. Please try a different query format.",
                ticker
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::AggregateParams;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingProvider {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingProvider {
        fn new(fail: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail,
            }
        }

        fn record(&self, call: String) -> Result<String, ToolkitError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(ToolkitError::MarketDataError("backend offline".to_string()))
            } else {
                Ok("{\"status\":\"OK\"}".to_string())
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for RecordingProvider {
        async fn ticker_news(&self, ticker: &str) -> Result<String, ToolkitError> {
            self.record(format!("news:{}", ticker))
        }

        async fn ticker_financials(&self, ticker: &str) -> Result<String, ToolkitError> {
            self.record(format!("financials:{}", ticker))
        }

        async fn aggregates(&self, params: &AggregateParams) -> Result<String, ToolkitError> {
            self.record(format!("aggregates:{}", params.ticker))
        }
    }

    fn tool_with(provider: Arc<RecordingProvider>) -> MarketDataTool {
        MarketDataTool::new(provider, CapabilitySet::full())
    }

    #[tokio::test]
    async fn test_no_ticker_makes_no_remote_call() {
        let provider = Arc::new(RecordingProvider::new(false));
        let tool = tool_with(provider.clone());

        let result = tool
            .execute(json!({"question": "how is the market today?"}))
            .await
            .unwrap();
        assert!(result.starts_with("No stock ticker found"));
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_news_question_invokes_news_once() {
        let provider = Arc::new(RecordingProvider::new(false));
        let tool = tool_with(provider.clone());

        let result = tool
            .execute(json!({"question": "latest news about AAPL"}))
            .await
            .unwrap();
        assert_eq!(result, "{\"status\":\"OK\"}");
        assert_eq!(*provider.calls.lock().unwrap(), vec!["news:AAPL".to_string()]);
    }

    #[tokio::test]
    async fn test_earnings_question_invokes_financials() {
        let provider = Arc::new(RecordingProvider::new(false));
        let tool = tool_with(provider.clone());

        tool.execute(json!({"question": "show TSLA earnings"}))
            .await
            .unwrap();
        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec!["financials:TSLA".to_string()]
        );
    }

    #[tokio::test]
    async fn test_price_question_invokes_aggregates() {
        let provider = Arc::new(RecordingProvider::new(false));
        let tool = tool_with(provider.clone());

        tool.execute(json!({"question": "GOOGL stock price over the past week"}))
            .await
            .unwrap();
        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec!["aggregates:GOOGL".to_string()]
        );
    }

    #[tokio::test]
    async fn test_remote_failure_becomes_output_string() {
        let provider = Arc::new(RecordingProvider::new(true));
        let tool = tool_with(provider);

        let result = tool
            .execute(json!({"question": "latest news about AAPL"}))
            .await
            .unwrap();
        assert!(result.starts_with("Error getting news for AAPL:"));
        assert!(result.contains("backend offline"));
    }

    #[tokio::test]
    async fn test_aggregates_failure_names_ticker() {
        let provider = Arc::new(RecordingProvider::new(true));
        let tool = tool_with(provider);

        let result = tool
            .execute(json!({"question": "MSFT price history"}))
            .await
            .unwrap();
        assert!(result.starts_with("Error getting price data for MSFT:"));
    }

    #[tokio::test]
    async fn test_unroutable_reports_ticker() {
        let provider = Arc::new(RecordingProvider::new(false));
        let tool = MarketDataTool::new(provider.clone(), CapabilitySet::none());

        let result = tool
            .execute(json!({"question": "AAPL stock price"}))
            .await
            .unwrap();
        assert_eq!(
            result,
            "Unable to process financial query for AAPL. Please try a different query format."
        );
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_reports_missing_key() {
        let tool = MarketDataTool::unconfigured();
        let result = tool
            .execute(json!({"question": "AAPL stock price"}))
            .await
            .unwrap();
        assert_eq!(result, "Error: Polygon API key not found.");
    }

    #[tokio::test]
    async fn test_missing_question_is_an_error() {
        let tool = MarketDataTool::unconfigured();
        assert!(tool.execute(json!({})).await.is_err());
    }
}
