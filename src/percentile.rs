/// Rank of `value` inside `sorted` (ascending) as a 0-to-1 position.
///
/// An empty population ranks everything at 0 and a single-element
/// population ranks everything at 1. Otherwise this is a lower-bound
/// search: the rank index is the first element `>= value` (the last index
/// when `value` tops the whole population), divided by `len - 1`. Ties
/// collapse onto the first qualifying bucket, which keeps repeated passes
/// over the same population reproducible.
pub fn percentile_rank(value: f64, sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return 1.0;
    }
    let mut idx = sorted.partition_point(|x| *x < value);
    if idx >= sorted.len() {
        idx = sorted.len() - 1;
    }
    idx as f64 / (sorted.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::percentile_rank;

    #[test]
    fn empty_population_ranks_zero() {
        assert_eq!(percentile_rank(0.0, &[]), 0.0);
        assert_eq!(percentile_rank(-5.0, &[]), 0.0);
        assert_eq!(percentile_rank(99.0, &[]), 0.0);
    }

    #[test]
    fn single_element_population_ranks_one() {
        assert_eq!(percentile_rank(0.5, &[3.0]), 1.0);
        assert_eq!(percentile_rank(3.0, &[3.0]), 1.0);
        assert_eq!(percentile_rank(7.0, &[3.0]), 1.0);
    }

    #[test]
    fn midpoint_ranks_half() {
        assert_eq!(percentile_rank(2.0, &[1.0, 2.0, 3.0]), 0.5);
    }

    #[test]
    fn extremes_rank_zero_and_one() {
        let pop = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile_rank(0.0, &pop), 0.0);
        assert_eq!(percentile_rank(1.0, &pop), 0.0);
        assert_eq!(percentile_rank(5.0, &pop), 1.0);
        // Above every member still collapses to the last index.
        assert_eq!(percentile_rank(50.0, &pop), 1.0);
    }

    #[test]
    fn ties_collapse_to_first_qualifying_index() {
        let pop = [1.0, 2.0, 2.0, 2.0, 3.0];
        assert_eq!(percentile_rank(2.0, &pop), 0.25);
    }

    #[test]
    fn rank_is_monotonic_in_value() {
        let pop = [0.2, 0.9, 1.4, 1.4, 2.7, 3.3, 8.0];
        let mut last = f64::NEG_INFINITY;
        let mut probe = -1.0;
        while probe <= 9.0 {
            let rank = percentile_rank(probe, &pop);
            assert!(rank >= last, "rank regressed at value {probe}");
            last = rank;
            probe += 0.05;
        }
    }
}
