use super::mutation::random_genotype;
use super::{BestSolution, SolveContext, Solver, Strategy};

/// Samples independent random genotypes and keeps the best. Baseline only.
pub struct RandomSearch {
    iterations: usize,
    spread: f64,
}

impl RandomSearch {
    pub fn new(iterations: usize, spread: f64) -> Self {
        Self { iterations, spread }
    }
}

impl Solver for RandomSearch {
    fn strategy(&self) -> Strategy {
        Strategy::RandomSearch
    }

    fn solve(&self, ctx: &mut SolveContext<'_>) -> BestSolution {
        let scorer = ctx.scorer;
        let items = &scorer.instance.items;
        let container = &scorer.instance.container;

        let first = random_genotype(ctx.rng, items, container, self.spread);
        let mut best = BestSolution::from_genotype(scorer, first);
        ctx.report(best.fitness(), best.fitness());
        if scorer.instance.is_empty() {
            return best;
        }

        for _ in 1..self.iterations {
            if best.report.is_perfect() || ctx.should_stop() {
                break;
            }
            let candidate = random_genotype(ctx.rng, items, container, self.spread);
            let (_, report) = scorer.score(&candidate);
            best.offer(&candidate, &report, scorer);
            ctx.report(best.fitness(), report.total);
        }

        best
    }
}
