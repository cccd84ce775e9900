//! Market-data provider seam and the Polygon REST client.
//!
//! The provider trait is the injection point for tests and alternative
//! backends; `PolygonClient` is the production implementation. Payloads are
//! returned verbatim as the response body so the calling agent sees exactly
//! what the remote service produced.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::errors::ToolkitError;
use crate::polygon::AggregateParams;

/// Remote operations exposed by a market-data backend.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn ticker_news(&self, ticker: &str) -> Result<String, ToolkitError>;

    async fn ticker_financials(&self, ticker: &str) -> Result<String, ToolkitError>;

    async fn aggregates(&self, params: &AggregateParams) -> Result<String, ToolkitError>;
}

/// REST client for the Polygon.io API.
pub struct PolygonClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PolygonClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn get_payload(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<String, ToolkitError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ToolkitError::MarketDataError(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolkitError::MarketDataError(format!(
                "remote returned status {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ToolkitError::MarketDataError(format!("failed to read response: {}", e)))
    }
}

#[async_trait]
impl MarketDataProvider for PolygonClient {
    async fn ticker_news(&self, ticker: &str) -> Result<String, ToolkitError> {
        log::info!("Fetching ticker news for {}", ticker);
        self.get_payload("/v2/reference/news", &[("ticker", ticker), ("limit", "10")])
            .await
    }

    async fn ticker_financials(&self, ticker: &str) -> Result<String, ToolkitError> {
        log::info!("Fetching financials for {}", ticker);
        self.get_payload("/vX/reference/financials", &[("ticker", ticker)])
            .await
    }

    async fn aggregates(&self, params: &AggregateParams) -> Result<String, ToolkitError> {
        log::info!(
            "Fetching {} aggregates for {} from {} to {}",
            params.timespan,
            params.ticker,
            params.from_date,
            params.to_date
        );

        let path = format!(
            "/v2/aggs/ticker/{}/range/{}/{}/{}/{}",
            params.ticker,
            params.timespan_multiplier,
            params.timespan.as_str(),
            params.from_date,
            params.to_date
        );
        self.get_payload(&path, &[("adjusted", "true"), ("sort", "asc")])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::Timespan;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_unreachable_host_is_a_market_data_error() {
        let client = PolygonClient::new("demo", "http://127.0.0.1:1");
        let result = client.ticker_news("AAPL").await;
        assert!(matches!(result, Err(ToolkitError::MarketDataError(_))));
    }

    #[tokio::test]
    async fn test_aggregates_path_shape() {
        // The path is built before any network I/O; exercise it through the
        // error message of an unreachable host.
        let client = PolygonClient::new("demo", "http://127.0.0.1:1");
        let params = AggregateParams {
            ticker: "GOOGL".to_string(),
            timespan: Timespan::Day,
            timespan_multiplier: 1,
            from_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        };
        let result = client.aggregates(&params).await;
        assert!(result.is_err());
    }
}
