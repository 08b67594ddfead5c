use rand::Rng;
use rand::seq::SliceRandom;

/// Picks up to `count` distinct items uniformly at random.
///
/// When `items` has no more than `count` entries all of them are returned in their original
/// order; otherwise exactly `count` are drawn without replacement.
pub fn sample_ids<T, R>(items: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if items.len() <= count {
        return items.to_vec();
    }
    items.choose_multiple(rng, count).cloned().collect()
}
