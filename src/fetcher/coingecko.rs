use crate::config::AppConfig;
use crate::fetcher::MarketDataFetcher;
use crate::model::{FetchError, MarketChart, Query};

use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

/// Fetches `market_chart/range` data from the CoinGecko public API.
pub struct CoinGeckoFetcher {
    client: Client,
    base_url: String,
}

impl CoinGeckoFetcher {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, query: &Query) -> String {
        format!("{}/coins/{}/market_chart/range", self.base_url, query.coin)
    }

    fn query_params(query: &Query) -> [(&'static str, String); 3] {
        [
            ("vs_currency", query.currency.clone()),
            ("from", query.range.start.timestamp().to_string()),
            ("to", query.range.end.timestamp().to_string()),
        ]
    }
}

#[async_trait::async_trait]
impl MarketDataFetcher for CoinGeckoFetcher {
    async fn fetch(&self, query: &Query) -> Result<MarketChart, FetchError> {
        let url = self.build_url(query);
        let params = Self::query_params(query);
        info!("Fetching {} for {} ({} to {})", url, query.currency, params[1].1, params[2].1);

        let response = self.client.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Market data request for {} failed with {}", query.coin, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let chart = decode_chart(&body)?;
        info!(
            "Received {} prices, {} volumes, {} market caps",
            chart.prices.len(),
            chart.total_volumes.len(),
            chart.market_caps.len()
        );
        Ok(chart)
    }
}

fn decode_chart(body: &str) -> Result<MarketChart, FetchError> {
    Ok(serde_json::from_str(body)?)
}
