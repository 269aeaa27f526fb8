use crate::error::LfResult;
use clap::{parser::ValueSource, ArgAction, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: FitnessWeights,
    #[command(flatten)]
    pub baselines: BaselineParams,
}

/// Genetic algorithm parameters.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 100)]
    pub population_size: usize,
    #[arg(long, default_value_t = 500)]
    pub generations: usize,
    /// Per-gene probability of a jitter mutation.
    #[arg(long, default_value_t = 0.15)]
    pub mutation_rate: f64,
    #[arg(long, default_value_t = 0.9)]
    pub crossover_rate: f64,
    #[arg(long, default_value_t = 4)]
    pub tournament_size: usize,
    #[arg(long, default_value_t = 8)]
    pub elite_count: usize,

    /// Jitter standard deviation as a fraction of the container extent.
    #[arg(long, default_value_t = 0.1)]
    pub mutation_scale: f64,
    #[arg(long, default_value_t = 0.2)]
    pub rotation_flip_rate: f64,
    /// How far (fraction of extent) initial coordinates may fall outside the container.
    #[arg(long, default_value_t = 0.1)]
    pub init_spread: f64,

    // === STAGNATION ===
    /// Generations without improvement before the mutation rate starts growing (0 = off).
    #[arg(long, default_value_t = 30)]
    pub adaptive_after: usize,
    /// Generations without improvement before stopping (0 = off).
    #[arg(long, default_value_t = 0)]
    pub stagnation_limit: usize,

    /// Run local search and grid refinement on the GA result.
    #[arg(long, default_value_t = false)]
    pub polish: bool,
    /// Put one greedy layout into the initial population.
    #[arg(long = "no-greedy-seed", action = ArgAction::SetFalse)]
    pub greedy_seed: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation_rate: 0.15,
            crossover_rate: 0.9,
            tournament_size: 4,
            elite_count: 8,
            mutation_scale: 0.1,
            rotation_flip_rate: 0.2,
            init_spread: 0.1,
            adaptive_after: 30,
            stagnation_limit: 0,
            polish: false,
            greedy_seed: true,
        }
    }
}

/// Multipliers turning raw violations into fitness. Geometric violations are
/// weighted far above balance; see `scorer::evaluate` for the feasibility floor.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    /// Per unit of overlapping area.
    #[arg(long, default_value_t = 1000.0)]
    pub penalty_overlap: f64,
    /// Per unit of area outside the container.
    #[arg(long, default_value_t = 1000.0)]
    pub penalty_bounds: f64,
    /// Per unit of weight over the limit.
    #[arg(long, default_value_t = 10.0)]
    pub penalty_weight: f64,
    /// Per unit of center-of-mass distance outside the safe zone.
    #[arg(long, default_value_t = 100.0)]
    pub penalty_balance: f64,
    /// Half-extent of the safe zone around the center, as a fraction of the container.
    /// 0.0 measures the distance to the exact center.
    #[arg(long, default_value_t = 0.3)]
    pub balance_tolerance: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            penalty_overlap: 1000.0,
            penalty_bounds: 1000.0,
            penalty_weight: 10.0,
            penalty_balance: 100.0,
            balance_tolerance: 0.3,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum GreedyOrder {
    #[default]
    LargestFirst,
    InputOrder,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineParams {
    #[arg(long, default_value_t = 2000)]
    pub random_iterations: usize,

    #[arg(long, default_value_t = 0.1)]
    pub greedy_step: f64,
    #[arg(long, value_enum, default_value_t = GreedyOrder::LargestFirst)]
    pub greedy_order: GreedyOrder,

    #[arg(long, default_value_t = 2000)]
    pub local_search_iterations: usize,
    #[arg(long, default_value_t = 500)]
    pub local_search_patience: usize,
    /// Move size as a fraction of the container extent.
    #[arg(long, default_value_t = 0.05)]
    pub local_search_step: f64,

    #[arg(long, default_value_t = 20)]
    pub refine_coarse_divisions: usize,
    #[arg(long, default_value_t = 0.05)]
    pub refine_fine_step: f64,
}

impl Default for BaselineParams {
    fn default() -> Self {
        Self {
            random_iterations: 2000,
            greedy_step: 0.1,
            greedy_order: GreedyOrder::LargestFirst,
            local_search_iterations: 2000,
            local_search_patience: 500,
            local_search_step: 0.05,
            refine_coarse_divisions: 20,
            refine_fine_step: 0.05,
        }
    }
}

impl SearchParams {
    /// Population size the GA actually runs with.
    pub fn population(&self) -> usize {
        self.population_size.max(1)
    }

    /// Effective elite count; never the whole population.
    pub fn elites(&self) -> usize {
        self.elite_count.min(self.population() - 1)
    }
}

impl FitnessWeights {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every weight the user typed on the command line over `self`.
    pub fn merge_from_cli(&mut self, cli_weights: &FitnessWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(penalty_overlap, "penalty_overlap");
        update_if_present!(penalty_bounds, "penalty_bounds");
        update_if_present!(penalty_weight, "penalty_weight");
        update_if_present!(penalty_balance, "penalty_balance");
        update_if_present!(balance_tolerance, "balance_tolerance");
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Rejects parameter combinations the solvers cannot run with.
    pub fn validate(&self) -> LfResult<()> {
        use crate::error::LoadForgeError::Config as E;
        let s = &self.search;
        if s.population_size < 2 {
            return Err(E("population_size must be at least 2".into()));
        }
        if s.tournament_size == 0 {
            return Err(E("tournament_size must be at least 1".into()));
        }
        for (name, p) in [
            ("mutation_rate", s.mutation_rate),
            ("crossover_rate", s.crossover_rate),
            ("rotation_flip_rate", s.rotation_flip_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(E(format!("{} must be within [0, 1], got {}", name, p)));
            }
        }
        for (name, v) in [
            ("mutation_scale", s.mutation_scale),
            ("init_spread", s.init_spread),
            ("local_search_step", self.baselines.local_search_step),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(E(format!("{} must be a non-negative number, got {}", name, v)));
            }
        }
        let w = &self.weights;
        for (name, v) in [
            ("penalty_overlap", w.penalty_overlap),
            ("penalty_bounds", w.penalty_bounds),
            ("penalty_weight", w.penalty_weight),
            ("penalty_balance", w.penalty_balance),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(E(format!("{} must be a non-negative number", name)));
            }
        }
        if !(0.0..=0.5).contains(&w.balance_tolerance) {
            return Err(E("balance_tolerance must be within [0, 0.5]".into()));
        }
        let b = &self.baselines;
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(b.greedy_step) || !positive(b.refine_fine_step) || b.refine_coarse_divisions == 0 {
            return Err(E("grid steps must be positive".into()));
        }
        Ok(())
    }
}
