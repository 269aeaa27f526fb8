use super::{BestSolution, SolveContext};
use crate::config::BaselineParams;
use crate::geometry::grid_positions;
use crate::placement::Gene;

/// Full sweeps over all items; a sweep that changes nothing ends refinement.
const MAX_PASSES: usize = 2;
/// Half-width of the local window, in steps, around the best coarse position.
const WINDOW: i32 = 2;

/// Best position for item `idx` with every other gene held fixed. Searches a
/// coarse grid over the whole container, then halves the step around the
/// incumbent until it drops below `fine_step`. Returns `None` unless something
/// strictly beats `incumbent`.
fn best_position(
    ctx: &SolveContext<'_>,
    genotype: &[Gene],
    idx: usize,
    incumbent: f64,
    params: &BaselineParams,
) -> Option<(Gene, f64)> {
    let scorer = ctx.scorer;
    let item = &scorer.instance.items[idx];
    let container = &scorer.instance.container;
    let mut trial = genotype.to_vec();
    let mut best: Option<(Gene, f64)> = None;
    let mut best_total = incumbent;

    let orientations: &[bool] = if item.rotatable { &[false, true] } else { &[false] };
    let coarse_step = container.width.max(container.depth) / params.refine_coarse_divisions.max(1) as f64;

    for &rotated in orientations {
        let (w, d) = item.footprint(rotated);
        let (x_max, y_max) = (container.width - w, container.depth - d);
        if x_max < 0.0 || y_max < 0.0 {
            continue;
        }

        let mut try_at = |x: f64, y: f64, best: &mut Option<(Gene, f64)>, best_total: &mut f64| {
            trial[idx] = Gene::new(x, y, rotated);
            let total = scorer.score_total(&trial);
            if total < *best_total {
                *best_total = total;
                *best = Some((trial[idx], total));
            }
        };

        let mut local: Option<(Gene, f64)> = None;
        let mut local_total = f64::INFINITY;
        for &y in &grid_positions(y_max, coarse_step) {
            for &x in &grid_positions(x_max, coarse_step) {
                try_at(x, y, &mut local, &mut local_total);
            }
        }

        let mut step = coarse_step;
        while step > params.refine_fine_step {
            step *= 0.5;
            let Some((center, _)) = local else { break };
            for dy in -WINDOW..=WINDOW {
                for dx in -WINDOW..=WINDOW {
                    let x = (center.x + dx as f64 * step).clamp(0.0, x_max);
                    let y = (center.y + dy as f64 * step).clamp(0.0, y_max);
                    try_at(x, y, &mut local, &mut local_total);
                }
            }
        }

        if let Some((gene, total)) = local {
            if total < best_total {
                best_total = total;
                best = Some((gene, total));
            }
        }
    }
    best
}

/// Coarse-to-fine grid search, one item at a time. Only strict improvements
/// are applied, so the result is never worse than `start`.
pub fn refine(ctx: &mut SolveContext<'_>, start: BestSolution, params: &BaselineParams) -> BestSolution {
    let scorer = ctx.scorer;
    let mut current = start;

    for _ in 0..MAX_PASSES {
        let mut changed = false;
        for idx in 0..scorer.item_count() {
            if current.report.is_perfect() || ctx.should_stop() {
                return current;
            }
            let found = best_position(ctx, &current.genotype, idx, current.fitness(), params);
            let candidate_total = match found {
                Some((gene, _)) => {
                    let mut genotype = current.genotype.clone();
                    genotype[idx] = gene;
                    current = BestSolution::from_genotype(scorer, genotype);
                    changed = true;
                    current.fitness()
                }
                None => current.fitness(),
            };
            ctx.report(current.fitness(), candidate_total);
        }
        if !changed {
            break;
        }
    }
    current
}
