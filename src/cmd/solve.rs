use crate::reports;
use clap::Args;
use loadforge::api::{self, RunRequest, ResultRow};
use loadforge::config::Config;
use loadforge::error::LfResult;
use loadforge::instances::InstanceRepository;
use loadforge::optimizer::{ProgressEvent, Strategy};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub config: Config,

    /// Instance name (see `list`).
    pub instance: String,

    #[arg(short, long, value_enum, default_value_t = Strategy::GeneticAlgorithm)]
    pub strategy: Strategy,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Wall-clock limit in seconds.
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    /// Print the full run outcome as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write the result row to this CSV file.
    #[arg(short, long)]
    pub out: Option<String>,
}

pub fn run(args: SolveArgs, repo: &InstanceRepository) -> LfResult<()> {
    let instance = repo.get(&args.instance)?;
    let request = RunRequest {
        config: args.config.clone(),
        seed: args.seed,
        max_time: args.time.map(Duration::from_secs),
    };

    let quiet = args.json;
    let last_print = Mutex::new(Instant::now());
    let callback = |event: &ProgressEvent| {
        if quiet {
            return true;
        }
        if let Ok(mut last) = last_print.lock() {
            if last.elapsed() >= Duration::from_secs(1) {
                println!(
                    "   iter {:>6} | best {:>12.4} | current {:>12.4}",
                    event.iteration, event.best_fitness, event.current_fitness
                );
                *last = Instant::now();
            }
        }
        true
    };

    let outcome = api::run_instance(repo, &args.instance, args.strategy, &request, callback)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        reports::print_placement(instance, &outcome.best);
        reports::print_fitness_breakdown(&outcome.best.report);
        println!(
            "Strategy: {} | Time: {:.2}s{}",
            outcome.strategy,
            outcome.elapsed_secs,
            if outcome.cancelled { " (stopped early)" } else { "" }
        );
        println!("Fitness: {:.4}", outcome.fitness());
    }

    if let Some(path) = &args.out {
        let row = ResultRow::from_outcome(instance, &outcome);
        api::save_results_csv(&[row], path)?;
    }
    Ok(())
}
