//! Parameter extraction for the aggregates operation.
//!
//! Derives a date window and time granularity from keyword heuristics in the
//! question text. Windows are computed with calendar arithmetic relative to
//! today; an explicit `from YYYY-MM-DD to YYYY-MM-DD` literal in the question
//! overrides both dates unconditionally.

use chrono::{Duration, NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;

use crate::polygon::Timespan;

/// Parameters for a price-aggregates request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateParams {
    pub ticker: String,
    pub timespan: Timespan,
    pub timespan_multiplier: u32,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

fn date_range_regex() -> &'static Regex {
    static DATE_RANGE: OnceLock<Regex> = OnceLock::new();
    DATE_RANGE.get_or_init(|| {
        Regex::new(r"from (\d{4}-\d{2}-\d{2}) to (\d{4}-\d{2}-\d{2})").expect("valid regex")
    })
}

/// Extract aggregates parameters from a question, relative to today.
pub fn extract_aggregate_params(question: &str, ticker: &str) -> AggregateParams {
    extract_aggregate_params_at(question, ticker, Utc::now().date_naive())
}

/// Extraction core, parameterized by the reference date for deterministic tests.
pub(crate) fn extract_aggregate_params_at(
    question: &str,
    ticker: &str,
    today: NaiveDate,
) -> AggregateParams {
    let query = question.to_lowercase();

    // Default window: 7 days ending today.
    let mut from_date = today - Duration::days(7);
    let to_date = today;

    // Window keywords are independent conditionals; the last match wins.
    if query.contains("last week") || query.contains("past week") {
        from_date = today - Duration::days(7);
    }
    if query.contains("last month") || query.contains("past month") {
        from_date = today - Duration::days(30);
    }
    if query.contains("last year") || query.contains("past year") {
        from_date = today - Duration::days(365);
    }

    let timespan = if ["minute", "hourly", "hour"].iter().any(|kw| query.contains(kw)) {
        Timespan::Hour
    } else if ["weekly", "week"].iter().any(|kw| query.contains(kw)) {
        Timespan::Week
    } else if ["monthly", "month"].iter().any(|kw| query.contains(kw)) {
        Timespan::Month
    } else {
        Timespan::Day
    };

    let mut params = AggregateParams {
        ticker: ticker.to_string(),
        timespan,
        timespan_multiplier: 1,
        from_date,
        to_date,
    };

    // An explicit literal range overrides keyword-derived dates. Captures
    // that are not real calendar dates are ignored.
    if let Some(captures) = date_range_regex().captures(question) {
        let from = NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d");
        let to = NaiveDate::parse_from_str(&captures[2], "%Y-%m-%d");
        if let (Ok(from), Ok(to)) = (from, to) {
            params.from_date = from;
            params.to_date = to;
        } else {
            log::debug!(
                "Ignoring unparseable literal date range '{}'",
                &captures[0]
            );
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_default_window_is_seven_days() {
        let params = extract_aggregate_params_at("Get the stock price for AAPL", "AAPL", today());
        assert_eq!(params.ticker, "AAPL");
        assert_eq!(params.timespan, Timespan::Day);
        assert_eq!(params.timespan_multiplier, 1);
        assert_eq!(params.to_date, today());
        assert_eq!(params.from_date, today() - Duration::days(7));
    }

    #[test]
    fn test_last_month_window_uses_date_arithmetic() {
        let params = extract_aggregate_params_at(
            "Show me MSFT prices over the last month",
            "MSFT",
            today(),
        );
        assert_eq!(params.from_date, today() - Duration::days(30));
        assert_eq!(params.to_date, today());
        // "month" also selects the monthly granularity.
        assert_eq!(params.timespan, Timespan::Month);
    }

    #[test]
    fn test_past_year_window() {
        let params =
            extract_aggregate_params_at("NVDA performance over the past year", "NVDA", today());
        assert_eq!(params.from_date, today() - Duration::days(365));
    }

    #[test]
    fn test_last_window_keyword_wins_when_multiple_present() {
        let params = extract_aggregate_params_at(
            "Compare AAPL last week against the last year",
            "AAPL",
            today(),
        );
        assert_eq!(params.from_date, today() - Duration::days(365));
    }

    #[test]
    fn test_timespan_keywords() {
        let cases = [
            ("hourly AAPL prices", Timespan::Hour),
            ("AAPL prices by the minute", Timespan::Hour),
            ("weekly AAPL prices", Timespan::Week),
            ("monthly AAPL prices", Timespan::Month),
            ("AAPL prices", Timespan::Day),
        ];

        for (question, expected) in cases {
            let params = extract_aggregate_params_at(question, "AAPL", today());
            assert_eq!(params.timespan, expected, "question: {}", question);
        }
    }

    #[test]
    fn test_literal_range_overrides_keywords() {
        let params = extract_aggregate_params_at(
            "Get the stock price for GOOGL from 2024-01-01 to 2024-01-10 over the last month",
            "GOOGL",
            today(),
        );
        assert_eq!(
            params.from_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            params.to_date,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }

    #[test]
    fn test_unparseable_literal_range_is_ignored() {
        let params = extract_aggregate_params_at(
            "AAPL from 2024-13-01 to 2024-14-10 last week",
            "AAPL",
            today(),
        );
        assert_eq!(params.from_date, today() - Duration::days(7));
        assert_eq!(params.to_date, today());
    }
}
