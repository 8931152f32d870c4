/// Sum of `values[offset_d + multi_index[d]]` over dimensions, where rows are
/// `width` wide.
#[inline]
pub(crate) fn indexed_sum(values: &[f64], width: usize, multi_index: &[usize]) -> f64 {
    multi_index
        .iter()
        .enumerate()
        .map(|(d, &c)| values[d * width + c])
        .sum()
}

/// Index of the largest score; the lowest index wins ties.
///
/// Returns `None` only for an empty iterator.
#[inline]
pub(crate) fn argmax_first(scores: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (k, score) in scores.into_iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((k, score)),
        }
    }
    best.map(|(k, _)| k)
}
