use crate::model::{FetchError, MarketChart, Query};

/// Source of raw market-chart data for a query.
#[async_trait::async_trait]
pub trait MarketDataFetcher: Send + Sync {
    async fn fetch(&self, query: &Query) -> Result<MarketChart, FetchError>;
}
