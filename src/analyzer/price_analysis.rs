use crate::analyzer::extremum::highest_value;
use crate::analyzer::profit::best_trade_days;
use crate::analyzer::trend::longest_downward_trend;
use crate::model::{ProfitPair, Sample};
use tracing::debug;

/// Trait defining the interface for the series analyzer.
pub trait Analyzer {
    /// Longest run of consecutive daily price decreases.
    fn downward_trend(&self, prices: &[Sample]) -> Vec<Sample>;
    /// Day with the highest trading volume, `None` without data.
    fn highest_volume(&self, volumes: &[Sample]) -> Option<Sample>;
    /// Most profitable buy-then-sell pair, `None` when nothing gains.
    fn best_trade_days(&self, prices: &[Sample]) -> Option<ProfitPair>;
}

/// Implementation of the series analyzer.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    fn downward_trend(&self, prices: &[Sample]) -> Vec<Sample> {
        let trend = longest_downward_trend(prices);
        debug!(
            "Longest downward trend over {} days: {} days starting {:?}",
            prices.len(),
            trend.len(),
            trend.first().map(|s| s.day)
        );
        trend
    }

    fn highest_volume(&self, volumes: &[Sample]) -> Option<Sample> {
        let highest = highest_value(volumes);
        debug!("Highest volume over {} days: {:?}", volumes.len(), highest);
        highest
    }

    fn best_trade_days(&self, prices: &[Sample]) -> Option<ProfitPair> {
        let pair = best_trade_days(prices);
        match &pair {
            Some(p) => debug!(
                "Best trade over {} days: buy {} sell {} for {:.2}",
                prices.len(),
                p.buy_day,
                p.sell_day,
                p.gain
            ),
            None => debug!("No profitable trade over {} days", prices.len()),
        }
        pair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    #[test]
    fn analyzer_runs_all_three_scans_on_one_series() {
        let first = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let series: Vec<Sample> = [4.0, 3.0, 2.0, 9.0]
            .iter()
            .enumerate()
            .map(|(i, &value)| Sample { day: first + Days::new(i as u64), value })
            .collect();
        let analyzer = AnalyzerImpl::new();

        assert_eq!(analyzer.downward_trend(&series).len(), 2);
        assert_eq!(analyzer.highest_volume(&series).map(|s| s.value), Some(9.0));
        let pair = analyzer.best_trade_days(&series).unwrap();
        assert_eq!((pair.buy_day, pair.sell_day), (series[2].day, series[3].day));
    }
}
