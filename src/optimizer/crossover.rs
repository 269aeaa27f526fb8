use crate::placement::{Gene, Genotype};
use fastrand::Rng;

/// Uniform crossover: each gene is taken whole from either parent with equal
/// probability. Genes are never split, so x, y and rotation stay consistent.
pub fn crossover_uniform(p1: &[Gene], p2: &[Gene], rng: &mut Rng) -> Genotype {
    debug_assert_eq!(p1.len(), p2.len());
    p1.iter()
        .zip(p2)
        .map(|(a, b)| if rng.bool() { *a } else { *b })
        .collect()
}
