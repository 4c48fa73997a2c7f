use crate::model::Sample;

/// Longest run of strictly decreasing consecutive values.
///
/// The run holds the samples that were lower than their predecessor, so a run
/// of `k` decreasing steps has `k` samples and never includes the day it
/// started from. A tie resets the run. The first of several equally long runs
/// is returned.
pub fn longest_downward_trend(prices: &[Sample]) -> Vec<Sample> {
    let mut best_start = 0;
    let mut best_len = 0;
    let mut run_start = 0;
    let mut run_len = 0;

    for (i, pair) in prices.windows(2).enumerate() {
        if pair[1].value < pair[0].value {
            if run_len == 0 {
                run_start = i + 1;
            }
            run_len += 1;
            if run_len > best_len {
                best_start = run_start;
                best_len = run_len;
            }
        } else {
            run_len = 0;
        }
    }

    prices[best_start..best_start + best_len].to_vec()
}
