//! antsp: Ant Colony Optimization TSP solver [command line].
//!
//! Reads a whitespace-delimited square distance matrix, runs one or more
//! independent Ant System solvers and prints the shortest tour.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use u_antsp::aco::{AcoConfig, AcoRunner, Graph, PowerMode, DEFAULT_DISTANCE_OFFSET};
use u_antsp::batch::{BatchConfig, BatchRunner};

#[derive(Parser, Debug)]
#[command(name = "antsp")]
#[command(about = "Approximate TSP tours with Ant Colony Optimization")]
#[command(version)]
struct Cli {
    /// Distance matrix file (rows of whitespace-separated numbers)
    graph: PathBuf,

    /// Number of colony iterations
    #[arg(short, long, default_value_t = 2000)]
    iterations: usize,

    /// Pheromone exponent
    #[arg(short, long, default_value_t = 1.0)]
    alpha: f64,

    /// Inverse-distance exponent
    #[arg(short, long, default_value_t = 5.0)]
    beta: f64,

    /// Evaporation rate in [0, 1)
    #[arg(short, long, default_value_t = 0.5)]
    evaporation: f64,

    /// Pheromone deposit scale
    #[arg(short, long, default_value_t = 500.0)]
    q: f64,

    /// Initial trail strength
    #[arg(long, default_value_t = 1.0)]
    pheromone_init: f64,

    /// Probability of a uniformly random move, in [0, 1]
    #[arg(long, default_value_t = 0.01)]
    exploration_rate: f64,

    /// Ants per town
    #[arg(long, default_value_t = 0.8)]
    ant_factor: f64,

    /// Offset added to every distance at load time
    #[arg(long, default_value_t = DEFAULT_DISTANCE_OFFSET)]
    offset: f64,

    /// Random seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Use the fast approximate power function for selection weights
    #[arg(long)]
    fast_pow: bool,

    /// Number of independent solver instances
    #[arg(short = 'n', long, default_value_t = 1)]
    instances: usize,

    /// Build tours across ants in parallel (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn aco_config(&self) -> AcoConfig {
        let mut config = AcoConfig::default()
            .with_iterations(self.iterations)
            .with_alpha(self.alpha)
            .with_beta(self.beta)
            .with_evaporation(self.evaporation)
            .with_q(self.q)
            .with_pheromone_init(self.pheromone_init)
            .with_exploration_rate(self.exploration_rate)
            .with_ant_count_factor(self.ant_factor)
            .with_parallel(self.parallel);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.fast_pow {
            config = config.with_power(PowerMode::FastApprox);
        }
        config
    }
}

fn format_tour(tour: &[usize]) -> String {
    let towns: Vec<String> = tour.iter().map(usize::to_string).collect();
    format!("[{}]", towns.join(", "))
}

/// Always shows a fractional part, e.g. `13.0`.
fn format_length(length: f64) -> String {
    format!("{length:?}")
}

fn run(cli: &Cli) -> u_antsp::Result<()> {
    let graph = Graph::from_file(&cli.graph, cli.offset)?;
    let config = cli.aco_config();

    if cli.instances <= 1 {
        let result = AcoRunner::run(&graph, &config)?;
        println!(
            "Tour: {} Length: {}",
            format_tour(&result.best_tour),
            format_length(result.best_length)
        );
    } else {
        let batch = BatchConfig::default()
            .with_instances(cli.instances)
            .with_parallel(cli.parallel);
        let out = BatchRunner::run(&graph, &config, &batch)?;
        let best = out.best();
        println!(
            "Tour: {} Length: {}",
            format_tour(&best.best_tour),
            format_length(best.best_length)
        );
        println!("Elapsed Time: {}", out.elapsed.as_millis());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["antsp", "graph.txt"]);
        assert_eq!(cli.aco_config(), AcoConfig::default());
        assert_eq!(cli.instances, 1);
        assert_eq!(cli.offset, DEFAULT_DISTANCE_OFFSET);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "antsp", "g.txt", "-i", "10", "--seed", "4", "--fast-pow", "-n", "3", "-vv",
        ]);
        let config = cli.aco_config();
        assert_eq!(config.iterations, 10);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.power, PowerMode::FastApprox);
        assert_eq!(cli.instances, 3);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_format_tour() {
        assert_eq!(format_tour(&[2, 0, 1]), "[2, 0, 1]");
    }

    #[test]
    fn test_format_length_keeps_fraction() {
        assert_eq!(format_length(13.0), "13.0");
        assert_eq!(format_length(25.5), "25.5");
        assert_eq!(format_length(f64::INFINITY), "inf");
    }
}
