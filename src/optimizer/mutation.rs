use crate::instances::{Container, Item};
use crate::placement::{Gene, Genotype};
use fastrand::Rng;
use std::f64::consts::TAU;

/// Standard normal sample (Box-Muller).
#[inline(always)]
pub fn gaussian(rng: &mut Rng) -> f64 {
    let u1 = 1.0 - rng.f64(); // (0, 1]
    let u2 = rng.f64();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

#[inline(always)]
fn uniform(rng: &mut Rng, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return lo;
    }
    lo + rng.f64() * (hi - lo)
}

/// Random gene whose rectangle starts within `spread` (fraction of the
/// container extent) of the container on every side.
pub fn random_gene(rng: &mut Rng, item: &Item, container: &Container, spread: f64) -> Gene {
    let rotated = item.rotatable && rng.bool();
    let (w, d) = item.footprint(rotated);
    let mx = container.width * spread;
    let my = container.depth * spread;
    Gene {
        x: uniform(rng, -mx, container.width + mx - w),
        y: uniform(rng, -my, container.depth + my - d),
        rotated,
    }
}

pub fn random_genotype(rng: &mut Rng, items: &[Item], container: &Container, spread: f64) -> Genotype {
    items
        .iter()
        .map(|item| random_gene(rng, item, container, spread))
        .collect()
}

/// Gaussian jitter of one gene: sigma is `scale` times the container extent per axis.
#[inline(always)]
pub fn jitter_gene(rng: &mut Rng, gene: &mut Gene, container: &Container, scale: f64) {
    gene.x += gaussian(rng) * scale * container.width;
    gene.y += gaussian(rng) * scale * container.depth;
}

/// Per-gene mutation: with probability `rate` the gene is jittered and, for
/// rotatable items, flipped with probability `flip_rate`. Returns the number of
/// genes touched.
pub fn mutate(
    rng: &mut Rng,
    genotype: &mut [Gene],
    items: &[Item],
    container: &Container,
    rate: f64,
    scale: f64,
    flip_rate: f64,
) -> usize {
    let mut touched = 0;
    for (gene, item) in genotype.iter_mut().zip(items) {
        if rng.f64() >= rate {
            continue;
        }
        jitter_gene(rng, gene, container, scale);
        if item.rotatable && rng.f64() < flip_rate {
            gene.rotated = !gene.rotated;
        }
        touched += 1;
    }
    touched
}

/// Index drawn with probability proportional to `weights`. Falls back to a
/// uniform pick when every weight is zero.
pub fn pick_weighted_index(rng: &mut Rng, weights: &[f64]) -> usize {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return rng.usize(..weights.len());
    }
    let mut target = rng.f64() * total;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        if target < w {
            return i;
        }
        target -= w;
    }
    // float slack: last positive weight
    weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
}
