//! Financial market-data routing and the Polygon client
//!
//! A free-text financial question is routed to exactly one of an enumerated
//! set of remote operations: ticker news, ticker financials, or price
//! aggregates. Routing is a fixed-order keyword heuristic with no ambiguity
//! resolution and no state; the decision is constructed and consumed within
//! a single tool invocation.

pub mod client;
pub mod params;
pub mod router;

pub use client::{MarketDataProvider, PolygonClient};
pub use params::{extract_aggregate_params, AggregateParams};
pub use router::{extract_ticker, route_query};

/// Time-bucket granularity for aggregate bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timespan {
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

impl Timespan {
    pub fn as_str(self) -> &'static str {
        match self {
            Timespan::Hour => "hour",
            Timespan::Day => "day",
            Timespan::Week => "week",
            Timespan::Month => "month",
        }
    }
}

impl std::fmt::Display for Timespan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The remote operations a market-data backend can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketOperation {
    News,
    Financials,
    Aggregates,
}

/// Enumerated set of operations available on the backing provider.
///
/// Routing over this set is exhaustively checked; a keyword whose operation
/// is absent falls through to the next check in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    news: bool,
    financials: bool,
    aggregates: bool,
}

impl CapabilitySet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn full() -> Self {
        Self {
            news: true,
            financials: true,
            aggregates: true,
        }
    }

    pub fn with(mut self, operation: MarketOperation) -> Self {
        match operation {
            MarketOperation::News => self.news = true,
            MarketOperation::Financials => self.financials = true,
            MarketOperation::Aggregates => self.aggregates = true,
        }
        self
    }

    pub fn supports(&self, operation: MarketOperation) -> bool {
        match operation {
            MarketOperation::News => self.news,
            MarketOperation::Financials => self.financials,
            MarketOperation::Aggregates => self.aggregates,
        }
    }
}

/// The selected remote operation and its parameters for a given question.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// No uppercase 1-5 letter token in the question; terminal, no remote call.
    NoTicker,
    News {
        ticker: String,
    },
    Financials {
        ticker: String,
    },
    Aggregates(AggregateParams),
    /// A ticker was found but no operation is available for the question.
    Unroutable {
        ticker: String,
    },
}
