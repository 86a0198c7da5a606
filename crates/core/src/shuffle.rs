use rand::Rng;

/// In-place Fisher–Yates shuffle.
///
/// Walks from the last index down to 1 and swaps each slot with a uniformly
/// chosen slot at or before it. The random source is injected so callers can
/// pass a seeded generator.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Returns a shuffled copy of `items`.
#[must_use]
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_in_place(&mut out, rng);
    out
}
