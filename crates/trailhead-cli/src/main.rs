use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use trailhead_cli::commands::{climb, robots, tower, valves, RunOptions};
use trailhead_cli::logging::{init_logging, LogFormat, LoggingConfig};
use trailhead_cli::output::OutputFormat;
use trailhead_lib::{CycleLimits, SearchLimits};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Shortest-path search and periodic simulation puzzles"
)]
struct Cli {
    /// Output format for answers.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log format; overrides LOG_FORMAT.
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    /// Abort a search after expanding this many states.
    #[arg(long, global = true)]
    max_expansions: Option<usize>,

    /// Abort a search once this many entries are pending.
    #[arg(long, global = true)]
    max_frontier: Option<usize>,

    /// Give up on cycle detection after recording this many signatures.
    #[arg(long, global = true)]
    max_history: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fewest steps from S to E on each height map.
    Climb {
        /// Height map files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Start from whichever lowest square gives the shortest climb.
        #[arg(long)]
        any_start: bool,
    },
    /// Most pressure released by opening valves before the deadline.
    Valves {
        /// Valve network files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Minutes available.
        #[arg(long, default_value_t = 30)]
        minutes: u32,
        /// Valve to start from.
        #[arg(long, default_value = "AA")]
        start: String,
    },
    /// Sum of blueprint quality levels (id times most geodes opened).
    Robots {
        /// Blueprint files, one blueprint per line.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Minutes available.
        #[arg(long, default_value_t = 24)]
        minutes: u32,
    },
    /// Tower height after dropping rocks driven by a jet pattern.
    Tower {
        /// Jet pattern files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Rocks to drop.
        #[arg(long, default_value_t = 2022)]
        rocks: u64,
    },
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            format: self.format,
            limits: SearchLimits {
                max_expansions: self.max_expansions,
                max_frontier: self.max_frontier,
            },
            cycle_limits: CycleLimits {
                max_history: self.max_history,
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::from_env().with_format(cli.log_format));
    let options = cli.run_options();

    match &cli.command {
        Command::Climb { files, any_start } => climb::handle_climb(files, *any_start, &options),
        Command::Valves {
            files,
            minutes,
            start,
        } => valves::handle_valves(files, start, *minutes, &options),
        Command::Robots { files, minutes } => robots::handle_robots(files, *minutes, &options),
        Command::Tower { files, rocks } => tower::handle_tower(files, *rocks, &options),
    }
}
