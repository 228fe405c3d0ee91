use roaring::RoaringBitmap;

use super::SourceCollection;

pub fn prop_intersection_correct(result: &[u32], sources: &SourceCollection) -> bool {
    prop_strictly_increasing(result) &&
    prop_same_as_roaring(result, sources)
}

pub fn prop_strictly_increasing(result: &[u32]) -> bool {
    result.windows(2).all(|w| w[0] < w[1])
}

// Result is exactly the set of values common to every source.
pub fn prop_same_as_roaring(result: &[u32], sources: &SourceCollection) -> bool {
    let expected = sources.sources()
        .iter()
        .map(|source| source.as_slice().iter().copied().collect::<RoaringBitmap>())
        .reduce(|a, b| a & b)
        .unwrap_or_default();

    expected.iter().eq(result.iter().copied())
}
