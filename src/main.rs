use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use eight_puzzle::config::{ColorChoice, Config};
use eight_puzzle::loader;
use eight_puzzle::puzzle::SIDE;
use eight_puzzle::search::DepthFirstMode;
use eight_puzzle::{Puzzle, SearchOutcome, Strategy};

#[derive(Parser)]
#[command(name = "eight-puzzle")]
#[command(version, about = "Solve the 3x3 sliding-tile puzzle", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a route between two puzzle files
    Solve(SolveArgs),

    /// Print a random start puzzle that can reach a target
    Generate(GenerateArgs),
}

#[derive(Args)]
struct SolveArgs {
    /// File holding the initial puzzle
    initial: PathBuf,

    /// File holding the target puzzle
    target: PathBuf,

    /// bfs, dfs, astar1 (misplaced tiles) or astar2 (total displacement)
    algorithm: Strategy,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up after generating this many successors
    #[arg(long)]
    node_limit: Option<usize>,

    /// Depth-first behaviour at dead ends: backtrack or strict
    #[arg(long)]
    dfs_mode: Option<DepthFirstMode>,

    /// auto, always or never
    #[arg(long)]
    color: Option<ColorChoice>,

    /// Only print the summary, not every puzzle on the route
    #[arg(long)]
    no_path: bool,
}

#[derive(Args)]
struct GenerateArgs {
    /// File holding the target puzzle (defaults to 1..8 with the blank last)
    #[arg(long)]
    target: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Scramble with this many random moves instead of a uniform shuffle
    #[arg(long)]
    moves: Option<usize>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve(args) => solve(args),
        Commands::Generate(args) => generate(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "eight_puzzle=warn",
        1 => "eight_puzzle=info",
        2 => "eight_puzzle=debug",
        _ => "eight_puzzle=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn solve(args: SolveArgs) -> Result<ExitCode> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    config
        .override_node_limit(args.node_limit)
        .context("invalid --node-limit")?;
    let limits = config.limits();
    let mode = args.dfs_mode.unwrap_or(config.search.depth_first_mode);
    let strategy = args.algorithm.with_depth_first_mode(mode);
    let style = Style::new(args.color.unwrap_or(config.output.color));
    let show_path = config.output.show_path && !args.no_path;

    let (start, goal) = loader::load_problem(&args.initial, &args.target)
        .context("failed to load puzzle definitions")?;

    println!("{}", style.heading("INITIAL STATE"));
    print!("{}", style.puzzle(&start));
    println!("{}", style.heading("TARGET STATE"));
    print!("{}", style.puzzle(&goal));

    if !start.is_reachable_from(&goal) {
        warn!("initial and target states have different parity; no route exists");
    }

    println!("Solving with {}...", describe(&strategy));
    let started = Instant::now();
    let (outcome, nodes_expanded) = strategy.solve(&start, &goal, limits);
    let elapsed = started.elapsed();

    let code = match &outcome {
        SearchOutcome::Found(path) => {
            println!(
                "{}",
                style.heading(&format!("TARGET STATE REACHED in {} moves", path.move_count()))
            );
            if show_path {
                println!("This is the path it took:");
                for state in path.states() {
                    print!("{}", style.puzzle(state));
                    println!("===");
                }
            }
            ExitCode::SUCCESS
        }
        SearchOutcome::NotFound => {
            println!("No route exists from the initial state to the target state.");
            ExitCode::FAILURE
        }
        SearchOutcome::Stalled { at } => {
            println!("Depth-first search stalled without backtracking at:");
            print!("{}", style.puzzle(at));
            ExitCode::FAILURE
        }
        SearchOutcome::LimitReached => {
            println!("Gave up after reaching the node limit.");
            ExitCode::FAILURE
        }
    };

    println!("The number of nodes expanded was {}", nodes_expanded);
    println!(
        "Total time to execute algorithm: {} milliseconds.",
        elapsed.as_millis()
    );
    Ok(code)
}

fn generate(args: GenerateArgs) -> Result<ExitCode> {
    let target = match &args.target {
        Some(path) => loader::load_puzzle(path).context("failed to load target puzzle")?,
        None => Puzzle::solved(),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = match args.moves {
        Some(steps) => target.random_walk(steps, &mut rng),
        None => Puzzle::shuffled_reachable(&target, &mut rng),
    };

    print!("{}", start);
    Ok(ExitCode::SUCCESS)
}

fn describe(strategy: &Strategy) -> String {
    match strategy {
        Strategy::BreadthFirst => "breadth-first search".to_string(),
        Strategy::DepthFirst(mode) => format!("depth-first search ({mode})"),
        Strategy::AStar(heuristic) => format!("A* search using the {heuristic} heuristic"),
    }
}

/// Terminal styling for boards and headings.
struct Style {
    enabled: bool,
}

impl Style {
    fn new(choice: ColorChoice) -> Self {
        let enabled = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_tty(),
        };
        Self { enabled }
    }

    fn heading(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Same layout as the puzzle file format, blank dimmed.
    fn puzzle(&self, puzzle: &Puzzle) -> String {
        if !self.enabled {
            return puzzle.to_string();
        }

        let mut out = String::new();
        for row in 0..SIDE {
            let cells: Vec<String> = (0..SIDE)
                .map(|col| {
                    let symbol = char::from(b'0' + puzzle.get(row, col));
                    if puzzle.is_blank(row, col) {
                        symbol.dark_grey().to_string()
                    } else {
                        symbol.bold().to_string()
                    }
                })
                .collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }
}
