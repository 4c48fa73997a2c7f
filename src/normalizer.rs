use crate::model::{MarketChart, NormalizedChart, RawPoint, Sample, Series};
use crate::utils::day_from_millis;
use std::collections::HashSet;
use tracing::{debug, warn};

pub fn normalize_chart(chart: &MarketChart) -> NormalizedChart {
    NormalizedChart {
        prices: normalize_series(&chart.prices),
        total_volumes: normalize_series(&chart.total_volumes),
        market_caps: normalize_series(&chart.market_caps),
    }
}

/// Buckets raw points into one sample per UTC day, keeping the first point
/// seen for each day in input order.
pub fn normalize_series(raw: &[RawPoint]) -> Series {
    let mut seen_days = HashSet::new();
    let mut series = Vec::with_capacity(raw.len());

    for &(timestamp_ms, value) in raw {
        let Some(day) = day_from_millis(timestamp_ms) else {
            warn!("Skipping point with unusable timestamp {}", timestamp_ms);
            continue;
        };
        // later intraday points lose to the first one
        if seen_days.insert(day) {
            series.push(Sample { day, value });
        }
    }

    debug!("Normalized {} raw points into {} days", raw.len(), series.len());
    series
}
