use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::{error, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use snake_pathfinder::config::SimulationConfig;
use snake_pathfinder::error::SnakeError;
use snake_pathfinder::network::WeightedNetwork;
use snake_pathfinder::simulation::{compare, ControllerKind, TrialSummary};

/// Plays unattended snake games and compares controller scores.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Controllers to compare; repeat the flag for several.
    #[arg(short, long = "controller", value_enum, default_value = "astar")]
    controllers: Vec<ControllerKind>,

    /// JSON file with simulation settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON weights for the neat controller.
    #[arg(long)]
    network: Option<PathBuf>,

    /// Games per controller.
    #[arg(short = 'n', long)]
    trials: Option<u32>,

    #[arg(long)]
    width: Option<u16>,

    #[arg(long)]
    height: Option<u16>,

    /// Seed of the first game; game `i` uses `seed + i`.
    #[arg(long)]
    seed: Option<u64>,

    /// Tick cap per game.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Starvation factor; `0` disables starvation.
    #[arg(long)]
    starvation: Option<u32>,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SnakeError> {
    let config = resolve_config(cli)?;
    let network = cli
        .network
        .as_deref()
        .map(WeightedNetwork::load)
        .transpose()?;

    let summaries = compare(&config, &cli.controllers, network.as_ref())?;

    if cli.json {
        let report = serde_json::to_string_pretty(&summaries)
            .map_err(|source| SnakeError::Json { path: None, source })?;
        println!("{report}");
    } else {
        print_table(&config, &summaries);
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<SimulationConfig, SnakeError> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(trials) = cli.trials {
        config.trials = trials;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(max_ticks) = cli.max_ticks {
        config.max_ticks = max_ticks;
    }
    if let Some(starvation) = cli.starvation {
        config.starvation_factor = starvation;
    }

    config.grid_size()?;
    Ok(config)
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };

    if let Err(err) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {err}");
    }
}

fn print_table(config: &SimulationConfig, summaries: &[TrialSummary]) {
    println!(
        "{} games per controller on a {}x{} board",
        config.trials, config.width, config.height
    );
    println!(
        "{:<10} {:>6} {:>6} {:>8} {:>10}",
        "controller", "min", "max", "mean", "fallbacks"
    );

    for summary in summaries {
        let name = match summary.controller {
            ControllerKind::Greedy => "greedy",
            ControllerKind::AStar => "astar",
            ControllerKind::Neat => "neat",
        };
        println!(
            "{:<10} {:>6} {:>6} {:>8.2} {:>10}",
            name,
            summary.min_score,
            summary.max_score,
            summary.mean_score,
            summary.total_fallbacks()
        );
    }
}
