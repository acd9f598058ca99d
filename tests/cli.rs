use clap::Parser;
use gridworld::{
    cli::commands::train::{TrainArgs, execute, run},
    grid,
};

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn default_run_plays_fifty_rounds() {
    let args = parse_args(["gridworld", "--quiet"]);
    let report = run(&args).expect("default training should succeed");

    assert_eq!(report.rounds, 50);
    assert_eq!(report.steps + report.episodes, 50);
    assert_eq!(report.values.len(), grid::ROWS);
    assert!(report.values.iter().all(|row| row.len() == grid::COLS));
}

#[test]
fn same_seed_reproduces_report() {
    let args = parse_args(["gridworld", "--quiet", "--rounds", "200", "--seed", "7"]);
    let first = run(&args).unwrap();
    let second = run(&args).unwrap();
    assert_eq!(first, second);
}

#[test]
fn greedy_run_from_reference_start() {
    let args = parse_args([
        "gridworld",
        "--quiet",
        "--rounds",
        "2",
        "--exploration-rate",
        "0",
        "--learning-rate",
        "0.3",
    ]);
    let report = run(&args).unwrap();

    assert_eq!(report.wins, 1);
    assert_eq!(report.values[0][3], 0.3);
    assert_eq!(report.values[0][2], 0.0);
    assert_eq!(report.final_position, grid::RESTART);
}

#[test]
fn json_output_succeeds() {
    let args = parse_args(["gridworld", "--quiet", "--json", "--rounds", "5"]);
    execute(args).expect("json output should succeed");
}

#[test]
fn start_on_obstacle_is_rejected() {
    let args = parse_args(["gridworld", "--start-row", "1", "--start-col", "1"]);
    let err = execute(args).unwrap_err();
    assert!(format!("{err:#}").contains("obstacle"), "{err:#}");
}

#[test]
fn start_outside_grid_is_rejected() {
    let args = parse_args(["gridworld", "--start-row", "5"]);
    assert!(execute(args).is_err());
}

#[test]
fn out_of_range_rate_is_rejected() {
    let args = parse_args(["gridworld", "--exploration-rate", "1.5"]);
    let err = execute(args).unwrap_err();
    assert!(format!("{err:#}").contains("exploration rate"), "{err:#}");
}

#[test]
fn stochastic_dynamics_are_rejected() {
    let args = parse_args(["gridworld", "--stochastic"]);
    let err = execute(args).unwrap_err();
    assert!(format!("{err:#}").contains("stochastic"), "{err:#}");
}

#[test]
fn summary_table_run_succeeds() {
    let args = parse_args(["gridworld", "--quiet", "--rounds", "30"]);
    execute(args).expect("summary output should succeed");
}
