//! Random helpers over an injected generator.

use fastrand::Rng;

/// Uniform value in `min..max`.
pub(crate) fn between(rng: &mut Rng, min: f64, max: f64) -> f64 {
    rng.f64() * (max - min) + min
}

/// Uniformly chosen element of a non-empty slice.
pub(crate) fn choose<T: Copy>(rng: &mut Rng, items: &[T]) -> T {
    items[rng.usize(..items.len())]
}
