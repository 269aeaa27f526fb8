use super::{build_solver, BestSolution, ProgressEvent, RunMonitor, SolveContext, Strategy};
use crate::config::Config;
use crate::error::LfResult;
use crate::scorer::Scorer;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone)]
pub struct OptimizationOptions {
    pub strategy: Strategy,
    pub max_time: Option<Duration>,
    /// Keep every progress event in `RunOutcome::history`.
    pub record_history: bool,
}

impl OptimizationOptions {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            max_time: None,
            record_history: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub strategy: Strategy,
    pub seed: Option<u64>,
    pub best: BestSolution,
    pub history: Vec<ProgressEvent>,
    pub elapsed_secs: f64,
    /// Stopped early by the callback or the time limit.
    pub cancelled: bool,
}

impl RunOutcome {
    pub fn fitness(&self) -> f64 {
        self.best.fitness()
    }
}

/// A trait for receiving updates during optimization.
/// Boolean return value indicates if the search should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent) -> bool;
}

impl<F> ProgressCallback for F
where
    F: Fn(&ProgressEvent) -> bool + Send + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) -> bool {
        self(event)
    }
}

struct Harness<'c, CB: ProgressCallback> {
    callback: &'c CB,
    record_history: bool,
    history: Vec<ProgressEvent>,
    start: Instant,
    max_time: Option<Duration>,
    cancelled: bool,
}

impl<CB: ProgressCallback> RunMonitor for Harness<'_, CB> {
    fn on_event(&mut self, event: &ProgressEvent) -> bool {
        if self.record_history {
            self.history.push(*event);
        }
        if !self.callback.on_progress(event) {
            self.cancelled = true;
            return false;
        }
        if let Some(limit) = self.max_time {
            if self.start.elapsed() >= limit {
                self.cancelled = true;
                return false;
            }
        }
        true
    }
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    config: Config,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, config: Config, options: OptimizationOptions) -> Self {
        Self {
            scorer,
            config,
            options,
        }
    }

    /// One run. The same seed, instance and config reproduce the same result.
    pub fn run<CB: ProgressCallback>(&self, seed: Option<u64>, callback: CB) -> LfResult<RunOutcome> {
        self.config.validate()?;
        let opts = &self.options;
        let mut rng = if let Some(s) = seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };

        let mut harness = Harness {
            callback: &callback,
            record_history: opts.record_history,
            history: Vec::new(),
            start: Instant::now(),
            max_time: opts.max_time,
            cancelled: false,
        };

        info!(
            "{} on '{}' ({} items, seed {:?})",
            opts.strategy,
            self.scorer.instance.name,
            self.scorer.item_count(),
            seed
        );

        let solver = build_solver(opts.strategy, &self.config);
        let best = {
            let mut ctx = SolveContext::new(&self.scorer, &mut rng, &mut harness);
            solver.solve(&mut ctx)
        };
        let elapsed = harness.start.elapsed();

        info!(
            "{} finished: fitness {:.4} in {:.2}s{}",
            opts.strategy,
            best.fitness(),
            elapsed.as_secs_f64(),
            if harness.cancelled { " (stopped early)" } else { "" }
        );

        Ok(RunOutcome {
            strategy: opts.strategy,
            seed,
            best,
            history: harness.history,
            elapsed_secs: elapsed.as_secs_f64(),
            cancelled: harness.cancelled,
        })
    }
}
