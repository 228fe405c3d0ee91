use std::ops::Range;

/// Split `elements` into `workers` contiguous ranges. Every range holds
/// `elements / workers` items except the first, which also takes the
/// remainder. Ranges may be empty when there are more workers than elements.
pub fn partition(elements: usize, workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0, "cannot partition across zero workers");

    let per_worker = elements / workers;
    let remainder = elements % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let len = per_worker + if worker == 0 { remainder } else { 0 };
        ranges.push(start..start + len);
        start += len;
    }
    debug_assert_eq!(start, elements);
    ranges
}
