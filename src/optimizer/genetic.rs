use super::crossover::crossover_uniform;
use super::mutation::{mutate, random_genotype};
use super::{greedy, local_search, refinement, BestSolution, SolveContext, Solver, Strategy};
use crate::config::{BaselineParams, SearchParams};
use crate::placement::Genotype;
use crate::scorer::{FitnessReport, Scorer};
use fastrand::Rng;
use tracing::debug;

/// Ceiling for the adaptive mutation rate (unless configured higher).
pub const ADAPTIVE_RATE_CAP: f64 = 0.5;
pub const ADAPTIVE_RATE_FACTOR: f64 = 1.5;

#[derive(Debug, Clone)]
pub struct Individual {
    pub genotype: Genotype,
    pub report: FitnessReport,
}

impl Individual {
    pub fn new(scorer: &Scorer, genotype: Genotype) -> Self {
        let (_, report) = scorer.score(&genotype);
        Self { genotype, report }
    }

    #[inline(always)]
    pub fn fitness(&self) -> f64 {
        self.report.total
    }
}

/// Stable ascending sort: equal fitness keeps the earlier individual first.
pub fn sort_population(population: &mut [Individual]) {
    population.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
}

/// Tournament over a distinct random subset of a *sorted* population. The
/// lowest index sampled wins, which is also the fittest.
pub fn tournament_select<'p>(rng: &mut Rng, population: &'p [Individual], size: usize) -> &'p Individual {
    let n = population.len();
    let k = size.clamp(1, n);
    let mut picked: Vec<usize> = Vec::with_capacity(k);
    while picked.len() < k {
        let i = rng.usize(..n);
        if !picked.contains(&i) {
            picked.push(i);
        }
    }
    let winner = picked.into_iter().min().unwrap_or(0);
    &population[winner]
}

/// Generational GA with elitism, tournament selection, uniform crossover and
/// Gaussian jitter mutation.
pub struct GeneticAlgorithm {
    params: SearchParams,
    baselines: BaselineParams,
}

impl GeneticAlgorithm {
    pub fn new(params: SearchParams, baselines: BaselineParams) -> Self {
        Self { params, baselines }
    }

    fn next_generation(&self, ctx: &mut SolveContext<'_>, population: &[Individual], rate: f64) -> Vec<Individual> {
        let p = &self.params;
        let scorer = ctx.scorer;
        let items = &scorer.instance.items;
        let container = &scorer.instance.container;

        let mut next: Vec<Individual> = population[..p.elites()].to_vec();
        while next.len() < p.population() {
            let a = tournament_select(ctx.rng, population, p.tournament_size);
            let mut child = if ctx.rng.f64() < p.crossover_rate {
                let b = tournament_select(ctx.rng, population, p.tournament_size);
                crossover_uniform(&a.genotype, &b.genotype, ctx.rng)
            } else {
                a.genotype.clone()
            };
            mutate(
                ctx.rng,
                &mut child,
                items,
                container,
                rate,
                p.mutation_scale,
                p.rotation_flip_rate,
            );
            next.push(Individual::new(scorer, child));
        }
        sort_population(&mut next);
        next
    }
}

impl Solver for GeneticAlgorithm {
    fn strategy(&self) -> Strategy {
        Strategy::GeneticAlgorithm
    }

    fn solve(&self, ctx: &mut SolveContext<'_>) -> BestSolution {
        let p = &self.params;
        let scorer = ctx.scorer;

        if scorer.instance.is_empty() {
            let best = BestSolution::from_genotype(scorer, Vec::new());
            ctx.report(best.fitness(), best.fitness());
            return best;
        }

        let items = &scorer.instance.items;
        let container = &scorer.instance.container;
        let mut population: Vec<Individual> = Vec::with_capacity(p.population());
        if p.greedy_seed {
            let g = greedy::construct(items, container, self.baselines.greedy_step, self.baselines.greedy_order);
            population.push(Individual::new(scorer, g));
        }
        while population.len() < p.population() {
            let g = random_genotype(ctx.rng, items, container, p.init_spread);
            population.push(Individual::new(scorer, g));
        }
        sort_population(&mut population);

        let mut best = BestSolution::from_genotype(scorer, population[0].genotype.clone());
        ctx.report(best.fitness(), population[0].fitness());

        let mut rate = p.mutation_rate;
        let rate_cap = ADAPTIVE_RATE_CAP.max(p.mutation_rate);
        let mut stagnant = 0usize;

        for generation in 1..=p.generations {
            if best.report.is_perfect() || ctx.should_stop() {
                break;
            }

            population = self.next_generation(ctx, &population, rate);
            let leader = &population[0];

            if best.offer(&leader.genotype, &leader.report, scorer) {
                stagnant = 0;
                rate = p.mutation_rate;
            } else {
                stagnant += 1;
                if p.adaptive_after > 0 && stagnant > p.adaptive_after {
                    rate = (rate * ADAPTIVE_RATE_FACTOR).min(rate_cap);
                }
            }

            if generation % 50 == 0 {
                debug!(
                    "gen {:>5} | best {:>12.4} | pop best {:>12.4} | mut rate {:.3}",
                    generation,
                    best.fitness(),
                    leader.fitness(),
                    rate
                );
            }

            ctx.report(best.fitness(), leader.fitness());

            if p.stagnation_limit > 0 && stagnant >= p.stagnation_limit {
                debug!("stagnated for {} generations at gen {}", stagnant, generation);
                break;
            }
        }

        if p.polish && !best.report.is_perfect() && !ctx.should_stop() {
            best = local_search::improve(ctx, best, &self.baselines);
            best = refinement::refine(ctx, best, &self.baselines);
        }

        best
    }
}
