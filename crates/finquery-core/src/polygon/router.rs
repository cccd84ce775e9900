//! Query routing for financial questions.
//!
//! Checks are evaluated in fixed order, news then financials then
//! aggregates, and the first match wins. Routing never performs a remote
//! call; it only selects the operation and builds its parameters.

use regex::Regex;
use std::sync::OnceLock;

use crate::polygon::params::extract_aggregate_params;
use crate::polygon::{CapabilitySet, MarketOperation, RouteDecision};

const FINANCIAL_KEYWORDS: &[&str] = &["financial", "statement", "earnings", "revenue", "profit"];

fn ticker_regex() -> &'static Regex {
    static TICKER: OnceLock<Regex> = OnceLock::new();
    TICKER.get_or_init(|| Regex::new(r"\b([A-Z]{1,5})\b").expect("valid regex"))
}

/// Extract the first 1-5 letter uppercase token from the original-case question.
///
/// Absence is a routable outcome, not an error.
pub fn extract_ticker(question: &str) -> Option<String> {
    ticker_regex()
        .captures(question)
        .map(|captures| captures[1].to_string())
}

/// Select exactly one operation for the question, or a terminal decision.
pub fn route_query(question: &str, capabilities: &CapabilitySet) -> RouteDecision {
    let Some(ticker) = extract_ticker(question) else {
        return RouteDecision::NoTicker;
    };

    let query = question.to_lowercase();

    if query.contains("news") && capabilities.supports(MarketOperation::News) {
        log::debug!("Routing '{}' to news for {}", question, ticker);
        return RouteDecision::News { ticker };
    }

    if FINANCIAL_KEYWORDS.iter().any(|kw| query.contains(kw))
        && capabilities.supports(MarketOperation::Financials)
    {
        log::debug!("Routing '{}' to financials for {}", question, ticker);
        return RouteDecision::Financials { ticker };
    }

    // Price/aggregates data is the default operation.
    if capabilities.supports(MarketOperation::Aggregates) {
        let params = extract_aggregate_params(question, &ticker);
        log::debug!("Routing '{}' to aggregates for {}", question, ticker);
        return RouteDecision::Aggregates(params);
    }

    RouteDecision::Unroutable { ticker }
}
