//! CLI entry point for the slider solver.
//!
//! Usage:
//!   slider-solver solve <boards.txt> [options]
//!   slider-solver solve --stdin [options]
//!
//! The input holds two non-empty lines, the start board then the goal
//! board, each as 9 whitespace-separated numbers (0 = blank), e.g.
//!   1 0 2 0 3 0 0 0 0
//!   0 0 0 0 1 2 0 0 3
//!
//! Options:
//!   --expansion-limit <n>  Maximum node expansions (default: 10)
//!   --strict-dedup         Also skip children already pending in the frontier
//!   --json                 Print a JSON report instead of the colored trace

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;

use slider_solver::{
    solve, Board, ChildSummary, DedupPolicy, NodeSummary, NullObserver, SearchObserver,
    SearchReport, SolverConfig,
};

#[derive(Parser)]
#[command(name = "slider-solver")]
#[command(about = "Bounded best-first solver for a turn-cycled 3x3 sliding puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search from a start board toward a goal board
    Solve {
        /// Path to the board file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the boards from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Maximum number of node expansions
        #[arg(long, default_value = "10")]
        expansion_limit: usize,

        /// Also skip children whose board is already waiting in the frontier
        #[arg(long)]
        strict_dedup: bool,

        /// Print a JSON report instead of the colored trace
        #[arg(long)]
        json: bool,
    },
}

/// Output format for a solve report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    goal_reached: bool,
    expansions: usize,
    expansion_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_cost: Option<u32>,
    time_elapsed_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            expansion_limit,
            strict_dedup,
            json,
        } => {
            let input = if stdin {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("failed to read from stdin")?;
                buffer
            } else if let Some(path) = file {
                fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?
            } else {
                bail!("must provide either a file path or --stdin");
            };

            let (start, goal) = parse_boards(&input)?;

            let config = SolverConfig {
                expansion_limit,
                dedup: if strict_dedup {
                    DedupPolicy::ExploredAndFrontier
                } else {
                    DedupPolicy::ExploredOnly
                },
            };

            let report = if json {
                solve(start, goal, config, &mut NullObserver)?
            } else {
                solve(start, goal, config, &mut TraceDisplay)?
            };

            if json {
                let output = format_report(&report, expansion_limit);
                println!("{}", serde_json::to_string_pretty(&output)?);
            }

            if !report.goal_reached() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Parse the two board lines: start first, goal second.
fn parse_boards(input: &str) -> anyhow::Result<(Board, Board)> {
    let mut lines = input.lines().filter(|line| !line.trim().is_empty());
    let start_line = lines.next().context("missing start board line")?;
    let goal_line = lines.next().context("missing goal board line")?;
    if lines.next().is_some() {
        bail!("expected exactly two board lines");
    }
    let start = start_line.parse::<Board>().context("invalid start board")?;
    let goal = goal_line.parse::<Board>().context("invalid goal board")?;
    Ok((start, goal))
}

fn format_report(report: &SearchReport, expansion_limit: usize) -> SolveOutput {
    SolveOutput {
        goal_reached: report.goal_reached(),
        expansions: report.expansions,
        expansion_limit,
        total_cost: report.total_cost,
        time_elapsed_ms: report.time_elapsed_ms,
    }
}

/// Colored trace of the search: expanded boards, candidate moves, and
/// the pending queue after every expansion.
struct TraceDisplay;

impl TraceDisplay {
    fn print_board(board: &Board) {
        println!("-------------");
        for row in board.cells() {
            let mut line = String::from("|");
            for value in row {
                if value == 0 {
                    line.push_str(&format!(" {} |", " ".cyan()));
                } else {
                    line.push_str(&format!(" {} |", value.to_string().yellow()));
                }
            }
            println!("{}", line);
            println!("-------------");
        }
    }

    fn format_state(board: &Board) -> String {
        format!("{:?}", board.cells())
    }
}

impl SearchObserver for TraceDisplay {
    fn on_node_expanded(&mut self, index: usize, board: &Board) {
        println!("{}", format!("EXPANDED NODE {}", index).red());
        Self::print_board(board);
    }

    fn on_goal_reached(&mut self, total_cost: u32) {
        println!("{}", "Goal reached!".blue());
        println!("Total Cost: {}", total_cost);
    }

    fn on_children_generated(&mut self, children: &[ChildSummary]) {
        println!("{}", "Possible Next Moves:".green());
        for child in children {
            println!(
                "  Move: {}, f: {}, g: {}, h: {}",
                child.moved, child.f, child.g, child.h
            );
        }
        println!();
    }

    fn on_frontier_snapshot(&mut self, entries: &[NodeSummary]) {
        println!("{}", "Current Queue:".green());
        for entry in entries {
            let moved = entry
                .moved
                .map(|m| m.to_string())
                .unwrap_or_else(|| "start".to_string());
            println!(
                "f_score: {}, g_score: {}, state: {}, move: {}",
                entry.f,
                entry.g,
                Self::format_state(&entry.board),
                moved
            );
        }
        println!();
    }

    fn on_search_exhausted(&mut self) {
        println!("Search ended. Goal state not reached within expanded node limit.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boards() {
        let (start, goal) = parse_boards("1 0 2 0 3 0 0 0 0\n0 0 0 0 1 2 0 0 3\n").unwrap();
        assert_eq!(start.cells(), [[1, 0, 2], [0, 3, 0], [0, 0, 0]]);
        assert_eq!(goal.cells(), [[0, 0, 0], [0, 1, 2], [0, 0, 3]]);
    }

    #[test]
    fn test_parse_boards_skips_blank_lines() {
        let input = "\n1 0 2 0 3 0 0 0 0\n\n0 0 0 0 1 2 0 0 3\n\n";
        assert!(parse_boards(input).is_ok());
    }

    #[test]
    fn test_parse_boards_rejects_missing_goal() {
        assert!(parse_boards("1 0 2 0 3 0 0 0 0\n").is_err());
    }

    #[test]
    fn test_parse_boards_rejects_extra_lines() {
        let input = "1 0 2 0 3 0 0 0 0\n0 0 0 0 1 2 0 0 3\n1 0 2 0 3 0 0 0 0\n";
        assert!(parse_boards(input).is_err());
    }
}
