pub mod crossover;
pub mod genetic;
pub mod greedy;
pub mod local_search;
pub mod mutation;
pub mod random_search;
pub mod refinement;
pub mod runner;

pub use self::runner::{OptimizationOptions, Optimizer, ProgressCallback, RunOutcome};

use crate::config::Config;
use crate::placement::{Gene, Genotype, Placement};
use crate::scorer::{FitnessReport, Scorer};
use clap::ValueEnum;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    GeneticAlgorithm,
    RandomSearch,
    Greedy,
    /// Greedy seed, then local search, then grid refinement.
    LocalSearch,
}

impl Strategy {
    pub fn abbrev(&self) -> &'static str {
        match self {
            Self::GeneticAlgorithm => "GA",
            Self::RandomSearch => "RS",
            Self::Greedy => "GR",
            Self::LocalSearch => "LS",
        }
    }
}

/// Best (genotype, placement, report) seen during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSolution {
    pub genotype: Genotype,
    pub placement: Placement,
    pub report: FitnessReport,
}

impl BestSolution {
    pub fn from_genotype(scorer: &Scorer, genotype: Genotype) -> Self {
        let (placement, report) = scorer.score(&genotype);
        Self {
            genotype,
            placement,
            report,
        }
    }

    #[inline(always)]
    pub fn fitness(&self) -> f64 {
        self.report.total
    }

    /// Replaces `self` only on strict improvement, so the first of several
    /// equal candidates is kept.
    pub fn offer(&mut self, genotype: &[Gene], report: &FitnessReport, scorer: &Scorer) -> bool {
        if report.total < self.report.total {
            self.genotype = genotype.to_vec();
            self.placement = scorer.decode(genotype);
            self.report = *report;
            return true;
        }
        false
    }
}

/// One progress sample. `best_fitness` is best-ever; `current_fitness` is the
/// best of the live population (GA) or the latest candidate (baselines).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub iteration: usize,
    pub best_fitness: f64,
    pub current_fitness: f64,
}

/// Receives progress events. Returning `false` asks the solver to stop before
/// its next iteration.
pub trait RunMonitor {
    fn on_event(&mut self, event: &ProgressEvent) -> bool;
}

/// Monitor that ignores everything and never cancels.
pub struct NullMonitor;

impl RunMonitor for NullMonitor {
    fn on_event(&mut self, _event: &ProgressEvent) -> bool {
        true
    }
}

/// Collaborators handed to a solver for one run.
pub struct SolveContext<'a> {
    pub scorer: &'a Scorer,
    pub rng: &'a mut Rng,
    monitor: &'a mut dyn RunMonitor,
    next_iteration: usize,
    stopped: bool,
}

impl<'a> SolveContext<'a> {
    pub fn new(scorer: &'a Scorer, rng: &'a mut Rng, monitor: &'a mut dyn RunMonitor) -> Self {
        Self {
            scorer,
            rng,
            monitor,
            next_iteration: 0,
            stopped: false,
        }
    }

    /// Emits an event numbered by how many events this run has emitted so far.
    pub fn report(&mut self, best_fitness: f64, current_fitness: f64) {
        let event = ProgressEvent {
            iteration: self.next_iteration,
            best_fitness,
            current_fitness,
        };
        self.next_iteration += 1;
        if !self.monitor.on_event(&event) {
            self.stopped = true;
        }
    }

    /// Cooperative cancellation point; solvers check it at the top of each loop.
    pub fn should_stop(&self) -> bool {
        self.stopped
    }
}

/// A search strategy. All implementations score through `ctx.scorer`, so
/// their fitness values are directly comparable.
pub trait Solver {
    fn strategy(&self) -> Strategy;
    fn solve(&self, ctx: &mut SolveContext<'_>) -> BestSolution;
}

pub fn build_solver(strategy: Strategy, config: &Config) -> Box<dyn Solver> {
    match strategy {
        Strategy::GeneticAlgorithm => Box::new(genetic::GeneticAlgorithm::new(
            config.search.clone(),
            config.baselines.clone(),
        )),
        Strategy::RandomSearch => Box::new(random_search::RandomSearch::new(
            config.baselines.random_iterations,
            config.search.init_spread,
        )),
        Strategy::Greedy => Box::new(greedy::GreedyPlacement::new(
            config.baselines.greedy_step,
            config.baselines.greedy_order,
        )),
        Strategy::LocalSearch => Box::new(local_search::LocalSearchPipeline::new(config.baselines.clone())),
    }
}
