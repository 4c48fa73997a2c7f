use crate::model::{ProfitPair, Sample};

/// Buy and sell days maximizing `sell - buy` with the buy strictly before the
/// sell. Returns `None` when no pair gains anything.
///
/// Single pass tracking the lowest price so far. Ties resolve to the earliest
/// buy day and then the earliest sell day, the same pair an exhaustive scan of
/// all `(i, j)` in order would keep.
pub fn best_trade_days(prices: &[Sample]) -> Option<ProfitPair> {
    let (first, rest) = prices.split_first()?;
    let mut lowest = first;
    let mut best: Option<ProfitPair> = None;
    let mut best_gain = 0.0;

    for sample in rest {
        let gain = sample.value - lowest.value;
        if gain > best_gain {
            best_gain = gain;
            best = Some(ProfitPair {
                buy_day: lowest.day,
                sell_day: sample.day,
                gain,
            });
        }
        if sample.value < lowest.value {
            lowest = sample;
        }
    }

    best
}
