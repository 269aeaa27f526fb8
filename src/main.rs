use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use loadforge::config::{Config, FitnessWeights};
use loadforge::error::LfResult;
use loadforge::instances::InstanceRepository;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "2D cargo loading optimizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Instance file (JSON). Defaults to the built-in set.
    #[arg(global = true, short, long)]
    instances: Option<String>,

    /// Fitness weights file (JSON). Explicit CLI weight flags still win.
    #[arg(global = true, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available instances.
    List(cmd::list::ListArgs),
    /// Run one strategy on one instance.
    Solve(cmd::solve::SolveArgs),
    /// Run several strategies over several instances and tabulate the results.
    Compare(cmd::compare::CompareArgs),
}

fn load_repository(path: &Option<String>) -> LfResult<InstanceRepository> {
    match path {
        Some(p) => {
            info!("Loading instances from {}", p);
            InstanceRepository::load_from_file(p)
        }
        None => InstanceRepository::builtin(),
    }
}

/// File weights become the base; weight flags typed on the command line override them.
fn resolve_config(mut config: Config, weights_path: &Option<String>, sub_matches: Option<&ArgMatches>) -> LfResult<Config> {
    if let Some(path) = weights_path {
        info!("Loading weights from {}", path);
        let mut file_weights = FitnessWeights::load_from_file(path)?;
        if let Some(m) = sub_matches {
            file_weights.merge_from_cli(&config.weights, m);
        }
        config.weights = file_weights;
    }
    config.validate()?;
    Ok(config)
}

fn execute(cli: Cli, matches: &ArgMatches) -> LfResult<()> {
    let repo = load_repository(&cli.instances)?;

    match cli.command {
        Commands::List(args) => cmd::list::run(args, &repo),
        Commands::Solve(mut args) => {
            args.config = resolve_config(args.config, &cli.weights, matches.subcommand_matches("solve"))?;
            cmd::solve::run(args, &repo)
        }
        Commands::Compare(mut args) => {
            args.config = resolve_config(args.config, &cli.weights, matches.subcommand_matches("compare"))?;
            cmd::compare::run(args, &repo)
        }
    }
}

fn main() {
    // Raw matches are kept to tell typed flags apart from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(cli, &matches) {
        error!("{}", e);
        process::exit(1);
    }
}
