use crate::reports;
use clap::Args;
use loadforge::api::{self, RunRequest};
use loadforge::config::Config;
use loadforge::error::LfResult;
use loadforge::instances::InstanceRepository;
use loadforge::optimizer::Strategy;
use std::time::Duration;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub config: Config,

    /// Instance names; all instances when omitted.
    #[arg(value_name = "INSTANCE")]
    pub names: Vec<String>,

    /// Comma-separated strategies; all when omitted.
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub strategies: Vec<Strategy>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Wall-clock limit per run, in seconds.
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    /// Write all result rows to this CSV file.
    #[arg(short, long)]
    pub out: Option<String>,
}

pub fn run(args: CompareArgs, repo: &InstanceRepository) -> LfResult<()> {
    let strategies: Vec<Strategy> = if args.strategies.is_empty() {
        Strategy::iter().collect()
    } else {
        args.strategies.clone()
    };
    let request = RunRequest {
        config: args.config.clone(),
        seed: args.seed,
        max_time: args.time.map(Duration::from_secs),
    };

    println!(
        "\nComparing {} strategies on {} instances...",
        strategies.len(),
        if args.names.is_empty() {
            repo.len()
        } else {
            args.names.len()
        }
    );

    let rows = api::compare(repo, &args.names, &strategies, &request)?;

    reports::print_results_table(&rows);
    reports::print_strategy_summary(&rows, &strategies);

    if let Some(path) = &args.out {
        api::save_results_csv(&rows, path)?;
        println!("Results written to {}", path);
    }
    Ok(())
}
