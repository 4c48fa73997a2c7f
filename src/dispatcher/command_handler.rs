// dispatcher/command_handler.rs

use crate::analyzer::{Analyzer, AnalyzerImpl};
use crate::dispatcher::command::{AnalysisKind, Command, parse_command};
use crate::fetcher::MarketDataFetcher;
use crate::model::{DateRange, DispatchError, FetchError, ProfitPair, Query, Sample};
use crate::normalizer::normalize_chart;
use crate::utils::to_title_case;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

pub const FAREWELL: &str = "Goodbye!";

/// Outcome of one dispatched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to show, e.g. a blank line.
    Nothing,
    Text(String),
    Help(String),
    /// The caller should stop reading input after showing the farewell.
    Quit(String),
}

impl Reply {
    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Nothing => None,
            Reply::Text(text) | Reply::Help(text) | Reply::Quit(text) => Some(text.as_str()),
        }
    }
}

/// Turns text commands into analyses of one coin's market data.
pub struct CommandDispatcher<F> {
    fetcher: F,
    analyzer: AnalyzerImpl,
    coin: String,
    currency: String,
}

impl<F: MarketDataFetcher> CommandDispatcher<F> {
    pub fn new(fetcher: F, coin: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            fetcher,
            analyzer: AnalyzerImpl::new(),
            coin: coin.into(),
            currency: currency.into(),
        }
    }

    /// Handles one input line.
    ///
    /// Unparseable shapes produce a help or hint reply. Invalid dates and
    /// failed fetches are returned as errors.
    pub async fn dispatch(&self, line: &str) -> Result<Reply, DispatchError> {
        info!("Handling command: {}", line.trim());
        let reply = match parse_command(line)? {
            Command::Empty => Reply::Nothing,
            Command::Help => Reply::Help(help_text()),
            Command::Quit => Reply::Quit(FAREWELL.to_string()),
            Command::Malformed => {
                warn!("Malformed command: {}", line.trim());
                Reply::Help(help_text())
            }
            Command::Unknown(word) => {
                Reply::Text(format!("Unknown command '{}'. Type help for a list of commands.", word))
            }
            Command::Analyze { kind, start, end } => Reply::Text(self.analyze(kind, start, end).await?),
        };
        Ok(reply)
    }

    async fn analyze(&self, kind: AnalysisKind, start: NaiveDate, end: NaiveDate) -> Result<String, FetchError> {
        let query = Query {
            coin: self.coin.clone(),
            currency: self.currency.clone(),
            range: DateRange::from_dates(start, end),
        };
        if start > end {
            warn!("Start date {} is after end date {}", start, end);
        }

        let chart = normalize_chart(&self.fetcher.fetch(&query).await?);
        debug!(
            "Normalized to {} prices, {} volumes, {} market caps",
            chart.prices.len(),
            chart.total_volumes.len(),
            chart.market_caps.len()
        );

        let sentence = match kind {
            AnalysisKind::Trend => trend_sentence(&query, &self.analyzer.downward_trend(&chart.prices)),
            AnalysisKind::Highest => volume_sentence(&query, self.analyzer.highest_volume(&chart.total_volumes)),
            AnalysisKind::BestDay => best_days_sentence(&query, self.analyzer.best_trade_days(&chart.prices)),
        };
        Ok(sentence)
    }
}

/// User-facing text for a failed dispatch.
pub fn render_error(error: &DispatchError) -> String {
    match error {
        DispatchError::Command(e) => format!("Invalid input: {}", e),
        DispatchError::Fetch(e) => format!("Query failed: {}", e),
    }
}

pub fn help_text() -> String {
    let mut help = String::from("Available commands:\n");
    for kind in AnalysisKind::ALL {
        let usage = format!("{} <start> <end>", kind.keyword());
        help.push_str(&format!("  {:<26}{}\n", usage, kind.description()));
    }
    help.push_str(&format!("  {:<26}{}\n", "help", "this list"));
    help.push_str(&format!("  {:<26}{}\n", "quit | exit", "leave"));
    help.push_str("Dates use the YYYY-MM-DD format.");
    help
}

fn range_suffix(query: &Query) -> String {
    format!(
        "for the inputs from {} and to {}",
        query.range.start_day(),
        query.range.end_day()
    )
}

fn trend_sentence(query: &Query, trend: &[Sample]) -> String {
    format!(
        "In {}’s historical data from CoinGecko, the price decreased {} days in a row {}",
        query.coin,
        trend.len(),
        range_suffix(query)
    )
}

fn volume_sentence(query: &Query, highest: Option<Sample>) -> String {
    match highest {
        Some(sample) => format!(
            "In {}’s historical data from CoinGecko, the highest trading volume was {} on {} {}",
            query.coin,
            sample.value,
            sample.day,
            range_suffix(query)
        ),
        None => format!(
            "In {}’s historical data from CoinGecko, there is no trading volume {}",
            query.coin,
            range_suffix(query)
        ),
    }
}

fn best_days_sentence(query: &Query, pair: Option<ProfitPair>) -> String {
    match pair {
        Some(pair) => format!(
            "Best pair of days to buy and sell {} are {} and {} {}",
            query.coin,
            pair.buy_day,
            pair.sell_day,
            range_suffix(query)
        ),
        None => format!(
            "{} should not be bought (or sold) {}",
            to_title_case(&query.coin),
            range_suffix(query)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MarketChart;
    use serde_json::json;
    use std::sync::Mutex;

    const JAN_19: i64 = 1_579_392_000_000;
    const JAN_20: i64 = 1_579_478_400_000;
    const JAN_21: i64 = 1_579_564_800_000;
    const HOUR: i64 = 3_600_000;

    /// Serves a canned chart and records every query it receives.
    struct FixtureFetcher {
        chart: serde_json::Value,
        queries: Mutex<Vec<Query>>,
    }

    impl FixtureFetcher {
        fn new(chart: serde_json::Value) -> Self {
            Self { chart, queries: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait::async_trait]
    impl MarketDataFetcher for FixtureFetcher {
        async fn fetch(&self, query: &Query) -> Result<MarketChart, FetchError> {
            self.queries.lock().unwrap().push(query.clone());
            Ok(serde_json::from_value(self.chart.clone())?)
        }
    }

    struct UnavailableFetcher;

    #[async_trait::async_trait]
    impl MarketDataFetcher for UnavailableFetcher {
        async fn fetch(&self, _query: &Query) -> Result<MarketChart, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    fn january_fixture() -> serde_json::Value {
        json!({
            "prices": [
                [JAN_19, 8000.0],
                [JAN_19 + HOUR, 7000.0],
                [JAN_20, 7900.0],
                [JAN_20 + HOUR, 9000.0],
                [JAN_21, 7800.0]
            ],
            "total_volumes": [
                [JAN_19, 2.5e10],
                [JAN_20, 3.1e10],
                [JAN_20 + HOUR, 9.9e10],
                [JAN_21, 3.1e10]
            ],
            "market_caps": [
                [JAN_19, 1.4e11],
                [JAN_20, 1.4e11],
                [JAN_21, 1.3e11]
            ]
        })
    }

    fn dispatcher(chart: serde_json::Value) -> CommandDispatcher<FixtureFetcher> {
        CommandDispatcher::new(FixtureFetcher::new(chart), "bitcoin", "eur")
    }

    #[tokio::test]
    async fn trend_counts_decreasing_days_of_first_daily_samples() {
        let dispatcher = dispatcher(january_fixture());

        let reply = dispatcher.dispatch("trend 2020-01-19 2020-01-21").await.unwrap();

        assert_eq!(
            reply,
            Reply::Text(
                "In bitcoin’s historical data from CoinGecko, the price decreased 2 days in a row \
                 for the inputs from 2020-01-19 and to 2020-01-21"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn query_carries_config_coin_and_widened_range() {
        let dispatcher = dispatcher(january_fixture());

        dispatcher.dispatch("trend 2020-01-19 2020-01-21").await.unwrap();

        let queries = dispatcher.fetcher.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].coin, "bitcoin");
        assert_eq!(queries[0].currency, "eur");
        assert_eq!(queries[0].range.start.timestamp(), 1_579_392_000);
        assert_eq!(queries[0].range.end.timestamp(), 1_579_568_400);
    }

    #[tokio::test]
    async fn highest_reports_first_day_with_max_volume() {
        let dispatcher = dispatcher(january_fixture());

        let reply = dispatcher.dispatch("HIGHEST 2020-01-19 2020-01-21").await.unwrap();

        let text = reply.text().unwrap();
        assert!(text.contains("the highest trading volume was 31000000000 on 2020-01-20"), "{}", text);
    }

    #[tokio::test]
    async fn best_day_names_buy_and_sell_days() {
        let chart = json!({ "prices": [[JAN_19, 7.0], [JAN_20, 1.0], [JAN_21, 5.0]] });
        let dispatcher = dispatcher(chart);

        let reply = dispatcher.dispatch("best_day 2020-01-19 2020-01-21").await.unwrap();

        assert_eq!(
            reply.text().unwrap(),
            "Best pair of days to buy and sell bitcoin are 2020-01-20 and 2020-01-21 \
             for the inputs from 2020-01-19 and to 2020-01-21"
        );
    }

    #[tokio::test]
    async fn empty_results_are_reported_not_failed() {
        let dispatcher = dispatcher(json!({}));

        let trend = dispatcher.dispatch("trend 2020-01-19 2020-01-21").await.unwrap();
        let highest = dispatcher.dispatch("highest 2020-01-19 2020-01-21").await.unwrap();
        let best = dispatcher.dispatch("best_day 2020-01-19 2020-01-21").await.unwrap();

        assert!(trend.text().unwrap().contains("decreased 0 days in a row"));
        assert!(highest.text().unwrap().contains("there is no trading volume"));
        assert_eq!(
            best.text().unwrap(),
            "Bitcoin should not be bought (or sold) for the inputs from 2020-01-19 and to 2020-01-21"
        );
    }

    #[tokio::test]
    async fn shape_problems_never_reach_the_fetcher() {
        let dispatcher = dispatcher(january_fixture());

        assert_eq!(dispatcher.dispatch("").await.unwrap(), Reply::Nothing);
        assert_eq!(dispatcher.dispatch("trend 2020-01-19").await.unwrap(), Reply::Help(help_text()));
        assert!(matches!(
            dispatcher.dispatch("lowest 2020-01-19 2020-01-21").await.unwrap(),
            Reply::Text(text) if text.contains("Unknown command 'lowest'")
        ));
        assert!(dispatcher.fetcher.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn help_and_quit() {
        let dispatcher = dispatcher(january_fixture());

        let help = dispatcher.dispatch("help").await.unwrap();
        let quit = dispatcher.dispatch("exit").await.unwrap();

        let help_text = help.text().unwrap();
        assert!(help_text.contains("trend <start> <end>"));
        assert!(help_text.contains("best_day <start> <end>"));
        assert_eq!(quit, Reply::Quit(FAREWELL.to_string()));
    }

    #[tokio::test]
    async fn invalid_date_and_fetch_failure_are_distinct_errors() {
        let dispatcher = dispatcher(january_fixture());
        let bad_date = dispatcher.dispatch("trend 2020-01-xx 2020-01-21").await.unwrap_err();
        assert!(matches!(bad_date, DispatchError::Command(_)));
        assert!(render_error(&bad_date).starts_with("Invalid input: '2020-01-xx'"));

        let offline = CommandDispatcher::new(UnavailableFetcher, "bitcoin", "eur");
        let failed = offline.dispatch("trend 2020-01-19 2020-01-21").await.unwrap_err();
        assert!(matches!(failed, DispatchError::Fetch(FetchError::Status(503))));
        assert!(render_error(&failed).starts_with("Query failed:"));
    }
}
