use crate::config::Config;
use crate::error::{LfResult, LoadForgeError};
use crate::instances::{Category, Instance, InstanceRepository};
use crate::optimizer::{
    OptimizationOptions, Optimizer, ProgressCallback, ProgressEvent, RunOutcome, Strategy,
};
use crate::scorer::Scorer;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// One (instance, strategy) result, flattened for CSV export and tables.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub instance: String,
    pub category: Category,
    pub strategy: Strategy,
    pub fitness: f64,
    pub perfect: bool,
    pub feasible: bool,
    pub items: usize,
    pub total_weight: f64,
    pub max_weight: f64,
    pub container_width: f64,
    pub container_depth: f64,
    pub com_x: f64,
    pub com_y: f64,
    pub overlap_area: f64,
    pub bounds_area: f64,
    pub excess_weight: f64,
    pub runtime_secs: f64,
    pub cancelled: bool,
    pub placement: String,
}

impl ResultRow {
    pub fn from_outcome(instance: &Instance, outcome: &RunOutcome) -> Self {
        let r = &outcome.best.report;
        Self {
            instance: instance.name.clone(),
            category: instance.category,
            strategy: outcome.strategy,
            fitness: r.total,
            perfect: r.is_perfect(),
            feasible: r.is_feasible(),
            items: instance.len(),
            total_weight: r.total_weight,
            max_weight: instance.container.max_weight,
            container_width: instance.container.width,
            container_depth: instance.container.depth,
            com_x: r.center_of_mass.0,
            com_y: r.center_of_mass.1,
            overlap_area: r.overlap_area,
            bounds_area: r.bounds_area,
            excess_weight: r.excess_weight,
            runtime_secs: outcome.elapsed_secs,
            cancelled: outcome.cancelled,
            placement: outcome.best.placement.summary(),
        }
    }
}

/// Settings shared by every run in a batch.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub config: Config,
    pub seed: Option<u64>,
    pub max_time: Option<Duration>,
}

/// Service: one run of `strategy` on the named instance.
pub fn run_instance<CB: ProgressCallback>(
    repo: &InstanceRepository,
    name: &str,
    strategy: Strategy,
    request: &RunRequest,
    callback: CB,
) -> LfResult<RunOutcome> {
    let instance = repo.get(name)?;
    run_on(instance, strategy, request, true, callback)
}

fn run_on<CB: ProgressCallback>(
    instance: &Instance,
    strategy: Strategy,
    request: &RunRequest,
    record_history: bool,
    callback: CB,
) -> LfResult<RunOutcome> {
    let scorer = Arc::new(Scorer::new(instance.clone(), request.config.weights.clone()));
    let mut options = OptimizationOptions::new(strategy);
    options.max_time = request.max_time;
    options.record_history = record_history;
    let optimizer = Optimizer::new(scorer, request.config.clone(), options);
    optimizer.run(request.seed, callback)
}

/// Service: every strategy on every named instance, sequentially. An empty
/// `names` slice means the whole repository.
pub fn compare(
    repo: &InstanceRepository,
    names: &[String],
    strategies: &[Strategy],
    request: &RunRequest,
) -> LfResult<Vec<ResultRow>> {
    request.config.validate()?;

    let instances: Vec<&Instance> = if names.is_empty() {
        repo.iter().collect()
    } else {
        names.iter().map(|n| repo.get(n)).collect::<LfResult<_>>()?
    };
    if strategies.is_empty() {
        return Err(LoadForgeError::Config("no strategies selected".into()));
    }

    let mut rows = Vec::with_capacity(instances.len() * strategies.len());
    for instance in instances {
        for &strategy in strategies {
            // rows never look at the history
            let outcome = run_on(instance, strategy, request, false, |_: &ProgressEvent| true)?;
            info!(
                "{:<40} {:<18} fitness {:>12.4}",
                instance.name,
                strategy.to_string(),
                outcome.fitness()
            );
            rows.push(ResultRow::from_outcome(instance, &outcome));
        }
    }
    Ok(rows)
}

pub fn write_results_csv<W: Write>(rows: &[ResultRow], writer: W) -> LfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_results_csv<P: AsRef<Path>>(rows: &[ResultRow], path: P) -> LfResult<()> {
    let file = std::fs::File::create(path)?;
    write_results_csv(rows, file)
}

pub fn load_results_csv<P: AsRef<Path>>(path: P) -> LfResult<Vec<ResultRow>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for rec in rdr.deserialize() {
        rows.push(rec?);
    }
    Ok(rows)
}
