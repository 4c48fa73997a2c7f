use crate::model::Sample;

/// Sample with the largest value; the earliest one wins a tie.
pub fn highest_value(series: &[Sample]) -> Option<Sample> {
    let mut highest: Option<Sample> = None;
    for sample in series {
        if highest.is_none_or(|current| sample.value > current.value) {
            highest = Some(*sample);
        }
    }
    highest
}
