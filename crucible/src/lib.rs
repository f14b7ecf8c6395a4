//! Command-line runner for the crucible puzzle solvers.
//!
//! Each subcommand reads one input file, runs one solver and prints its
//! answer. Library crates log through `log`; the binary installs
//! `env_logger`, with `-v` flags raising the default level.

mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use crucible_almanac::Almanac;
use crucible_core::style::{Color, paint};
use crucible_core::{CostGrid, read_lines};
use crucible_paths::{HeatLossSearch, Outcome, SearchOptions, SettlePolicy};
use crucible_workflows::Puzzle;
use log::info;

pub use error::CliError;

#[derive(Debug, Parser)]
#[command(
    name = "crucible",
    about = "Solve grid routing, almanac and workflow puzzles",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find the route through a digit grid that loses the least heat.
    HeatLoss(HeatLossArgs),
    /// Push seeds through an almanac and report the lowest location.
    Almanac(AlmanacArgs),
    /// Sort parts through workflows.
    Workflows(WorkflowArgs),
}

#[derive(Debug, Args)]
pub struct HeatLossArgs {
    /// Grid file, one row of digits per line.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
    /// Which states count as the same node: `exact` or `coordinate`.
    #[arg(long, default_value_t = SettlePolicy::Exact)]
    pub settle: SettlePolicy,
    /// Most cells the crucible may cross in a straight line.
    #[arg(long, default_value_t = 3)]
    pub max_straight: u8,
    /// Give up after expanding this many states.
    #[arg(long, value_name = "STATES")]
    pub budget: Option<usize>,
    /// Print every cell of the route.
    #[arg(long)]
    pub path: bool,
    /// Print the grid before solving.
    #[arg(long)]
    pub show_grid: bool,
}

impl HeatLossArgs {
    fn options(&self) -> SearchOptions {
        let options = SearchOptions::default()
            .with_settle(self.settle)
            .with_max_straight(self.max_straight);
        match self.budget {
            Some(b) => options.with_expansion_budget(b),
            None => options,
        }
    }
}

#[derive(Debug, Args)]
pub struct AlmanacArgs {
    /// Almanac file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
    /// Read the seeds as `(start, length)` pairs.
    #[arg(long)]
    pub ranges: bool,
}

#[derive(Debug, Args)]
pub struct WorkflowArgs {
    /// Workflow and parts file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
    /// Count every accepted rating combination instead of sorting parts.
    #[arg(long)]
    pub combinations: bool,
    /// Lowest rating considered when counting combinations.
    #[arg(long, default_value_t = 1)]
    pub min_rating: u32,
    /// Highest rating considered when counting combinations.
    #[arg(long, default_value_t = 4000)]
    pub max_rating: u32,
}

/// Install `env_logger`, defaulting to `warn` and raising the level once per
/// `-v`. `RUST_LOG` still takes precedence.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Run the parsed command, writing its answer to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W, color: bool) -> Result<(), CliError> {
    let mut out = Output { out, color };
    match &cli.command {
        Command::HeatLoss(args) => heat_loss(args, &mut out),
        Command::Almanac(args) => almanac(args, &mut out),
        Command::Workflows(args) => workflows(args, &mut out),
    }
}

struct Output<'a, W: Write> {
    out: &'a mut W,
    color: bool,
}

impl<W: Write> Output<'_, W> {
    fn paint(&self, text: &str, c: Color) -> String {
        if self.color {
            paint(text, c)
        } else {
            text.to_owned()
        }
    }

    fn answer(&mut self, label: &str, value: impl ToString) -> Result<(), CliError> {
        let value = self.paint(&value.to_string(), Color::Green);
        writeln!(self.out, "{label}: {value}")?;
        Ok(())
    }

    fn line(&mut self, text: &str) -> Result<(), CliError> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }
}

fn heat_loss<W: Write>(args: &HeatLossArgs, out: &mut Output<'_, W>) -> Result<(), CliError> {
    let lines = read_lines(&args.input)?;
    let grid = CostGrid::from_lines(&lines)?;
    info!("grid size: ({}, {})", grid.width(), grid.height());
    if args.show_grid {
        out.line(&grid.framed())?;
    }

    let mut search = HeatLossSearch::new(args.options());
    match search.run(&grid)? {
        Outcome::Found(route) => {
            out.answer("heat loss", route.cost)?;
            if args.path {
                for p in &route.path {
                    out.line(&p.to_string())?;
                }
            }
        }
        Outcome::Exhausted { expanded } => {
            let msg = format!(
                "no route from {} to {} ({expanded} states expanded)",
                grid.start(),
                grid.goal()
            );
            out.line(&out.paint(&msg, Color::Warning))?;
        }
        Outcome::Cancelled { expanded } => {
            let msg = format!("gave up after expanding {expanded} states");
            out.line(&out.paint(&msg, Color::Warning))?;
        }
    }
    Ok(())
}

fn almanac<W: Write>(args: &AlmanacArgs, out: &mut Output<'_, W>) -> Result<(), CliError> {
    let almanac = Almanac::from_lines(&read_lines(&args.input)?)?;
    let lowest = if args.ranges {
        almanac.lowest_location_for_ranges()?
    } else {
        almanac.lowest_location()
    };
    match lowest {
        Some(location) => out.answer("lowest location", location),
        None => out.line(&out.paint("no seeds", Color::Warning)),
    }
}

fn workflows<W: Write>(args: &WorkflowArgs, out: &mut Output<'_, W>) -> Result<(), CliError> {
    let puzzle = Puzzle::from_lines(&read_lines(&args.input)?)?;
    if args.combinations {
        let count = puzzle
            .system
            .accepted_combinations(args.min_rating, args.max_rating)?;
        out.answer("accepted combinations", count)
    } else {
        out.answer("accepted rating sum", puzzle.accepted_rating_sum()?)
    }
}
