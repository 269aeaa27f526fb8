use clap::{CommandFactory, FromArgMatches, Parser};
use loadforge::config::{Config, FitnessWeights, GreedyOrder};
use loadforge::error::LoadForgeError;
use rstest::rstest;
use std::fs;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let matches = TestCli::command().get_matches_from(args);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

#[test]
fn test_cli_defaults_match_struct_defaults() {
    let (cli, _) = parse(&["test"]);
    let d = Config::default();
    assert_eq!(cli.config.search.population_size, d.search.population_size);
    assert_eq!(cli.config.search.generations, 500);
    assert_eq!(cli.config.search.mutation_rate, 0.15);
    assert_eq!(cli.config.search.elite_count, 8);
    assert_eq!(cli.config.weights.penalty_overlap, d.weights.penalty_overlap);
    assert_eq!(cli.config.weights.balance_tolerance, 0.3);
    assert_eq!(cli.config.baselines.random_iterations, 2000);
    assert_eq!(cli.config.baselines.greedy_order, GreedyOrder::LargestFirst);
}

#[test]
fn test_cli_overrides() {
    let (cli, _) = parse(&[
        "test",
        "--population-size",
        "30",
        "--penalty-balance",
        "5",
        "--greedy-order",
        "input_order",
        "--polish",
    ]);
    assert_eq!(cli.config.search.population_size, 30);
    assert_eq!(cli.config.weights.penalty_balance, 5.0);
    assert_eq!(cli.config.baselines.greedy_order, GreedyOrder::InputOrder);
    assert!(cli.config.search.polish);
}

#[test]
fn test_weights_file_with_cli_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weights.json");
    fs::write(&path, r#"{ "penalty_overlap": 50.0, "penalty_balance": 7.0 }"#).unwrap();

    let mut file_weights = FitnessWeights::load_from_file(&path).unwrap();
    // missing fields fall back to defaults
    assert_eq!(file_weights.penalty_weight, 10.0);
    assert_eq!(file_weights.penalty_overlap, 50.0);

    let (cli, matches) = parse(&["test", "--penalty-balance", "1.5"]);
    file_weights.merge_from_cli(&cli.config.weights, &matches);

    assert_eq!(file_weights.penalty_balance, 1.5);
    // untouched by the command line, so the file wins over the CLI default
    assert_eq!(file_weights.penalty_overlap, 50.0);
}

#[test]
fn test_config_json_round_trip() {
    let mut c = Config::default();
    c.search.generations = 42;
    c.weights.penalty_bounds = 3.0;
    let json = serde_json::to_string(&c).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, json).unwrap();
    let back = Config::load_from_file(&path).unwrap();
    assert_eq!(back.search.generations, 42);
    assert_eq!(back.weights.penalty_bounds, 3.0);
}

#[test]
fn test_partial_config_json_uses_defaults() {
    let c: Config = serde_json::from_str(r#"{ "search": { "generations": 10 } }"#).unwrap();
    assert_eq!(c.search.generations, 10);
    assert_eq!(c.search.population_size, 100);
    assert_eq!(c.weights.penalty_overlap, 1000.0);
}

#[test]
fn test_validate() {
    assert!(Config::default().validate().is_ok());

    let mut c = Config::default();
    c.search.population_size = 1;
    assert!(matches!(c.validate(), Err(LoadForgeError::Config(_))));

    let mut c = Config::default();
    c.search.mutation_rate = 1.5;
    assert!(c.validate().is_err());

    let mut c = Config::default();
    c.weights.penalty_overlap = -1.0;
    assert!(c.validate().is_err());

    let mut c = Config::default();
    c.weights.balance_tolerance = 0.75;
    assert!(c.validate().is_err());
}

#[test]
fn test_elites_never_whole_population() {
    let mut c = Config::default();
    c.search.population_size = 4;
    c.search.elite_count = 10;
    assert_eq!(c.search.elites(), 3);
}

#[rstest]
#[case::nan_scale(|c: &mut Config| c.search.mutation_scale = f64::NAN, "mutation_scale")]
#[case::negative_spread(|c: &mut Config| c.search.init_spread = -0.1, "init_spread")]
#[case::infinite_step(|c: &mut Config| c.baselines.local_search_step = f64::INFINITY, "local_search_step")]
fn test_validate_rejects_bad_scales(#[case] tweak: fn(&mut Config), #[case] field: &str) {
    let mut c = Config::default();
    tweak(&mut c);
    match c.validate() {
        Err(LoadForgeError::Config(msg)) => assert!(msg.contains(field), "{}", msg),
        other => panic!("{} accepted: {:?}", field, other.is_ok()),
    }
}

#[test]
fn test_validate_rejects_nan_grid_step() {
    let mut c = Config::default();
    c.baselines.greedy_step = f64::NAN;
    assert!(c.validate().is_err());
}

#[test]
fn test_greedy_seed_flag() {
    let (cli, _) = parse(&["test"]);
    assert!(cli.config.search.greedy_seed);
    let (cli, _) = parse(&["test", "--no-greedy-seed"]);
    assert!(!cli.config.search.greedy_seed);
}

#[test]
fn test_zero_population_is_rejected_but_clamped() {
    let mut c = Config::default();
    c.search.population_size = 0;
    assert!(c.validate().is_err());
    assert_eq!(c.search.population(), 1);
    assert_eq!(c.search.elites(), 0);
}
