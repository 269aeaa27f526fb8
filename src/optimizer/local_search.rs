use super::greedy::GreedyPlacement;
use super::mutation::{gaussian, pick_weighted_index};
use super::{refinement, BestSolution, SolveContext, Solver, Strategy};
use crate::config::BaselineParams;
use tracing::debug;

/// Chance of a rotation flip (rotatable items only) instead of a shift.
const FLIP_PROBABILITY: f64 = 0.2;
/// Chance of choosing the moved item by violation cost rather than uniformly.
const GUIDED_PROBABILITY: f64 = 0.5;

/// Hill climbing on single-item moves. A move is kept when it does not worsen
/// the total, so the result is never worse than `start`. Stops after
/// `local_search_patience` consecutive moves without strict improvement.
pub fn improve(ctx: &mut SolveContext<'_>, start: BestSolution, params: &BaselineParams) -> BestSolution {
    let scorer = ctx.scorer;
    let items = &scorer.instance.items;
    let container = &scorer.instance.container;
    if items.is_empty() {
        return start;
    }

    let mut current = start;
    let mut costs = scorer.element_costs(&current.placement);
    let mut idle = 0usize;

    for _ in 0..params.local_search_iterations {
        if current.report.is_perfect() || idle >= params.local_search_patience || ctx.should_stop() {
            break;
        }

        let idx = if ctx.rng.f64() < GUIDED_PROBABILITY {
            pick_weighted_index(ctx.rng, &costs)
        } else {
            ctx.rng.usize(..items.len())
        };

        let mut candidate = current.genotype.clone();
        let gene = &mut candidate[idx];
        if items[idx].rotatable && ctx.rng.f64() < FLIP_PROBABILITY {
            gene.rotated = !gene.rotated;
        } else {
            gene.x += gaussian(ctx.rng) * params.local_search_step * container.width;
            gene.y += gaussian(ctx.rng) * params.local_search_step * container.depth;
        }

        let (placement, report) = scorer.score(&candidate);
        let candidate_total = report.total;
        if candidate_total <= current.fitness() {
            if candidate_total < current.fitness() {
                idle = 0;
            } else {
                idle += 1;
            }
            costs = scorer.element_costs(&placement);
            current = BestSolution {
                genotype: candidate,
                placement,
                report,
            };
        } else {
            idle += 1;
        }

        ctx.report(current.fitness(), candidate_total);
    }

    current
}

/// Greedy construction, then hill climbing, then grid refinement.
pub struct LocalSearchPipeline {
    params: BaselineParams,
}

impl LocalSearchPipeline {
    pub fn new(params: BaselineParams) -> Self {
        Self { params }
    }
}

impl Solver for LocalSearchPipeline {
    fn strategy(&self) -> Strategy {
        Strategy::LocalSearch
    }

    fn solve(&self, ctx: &mut SolveContext<'_>) -> BestSolution {
        let seed = GreedyPlacement::new(self.params.greedy_step, self.params.greedy_order).solve(ctx);
        debug!("greedy seed: {:.4}", seed.fitness());

        let climbed = improve(ctx, seed, &self.params);
        debug!("after local search: {:.4}", climbed.fitness());

        let refined = refinement::refine(ctx, climbed, &self.params);
        debug!("after refinement: {:.4}", refined.fitness());
        refined
    }
}
