use std::time::Duration;

use board_cutter::cutter::Cutter;
use board_cutter::input::{parse_board, parse_detail, validate};
use board_cutter::types::{DetailRequest, Outcome, expand};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "board_cutter",
    about = "Places rectangular details on a single board by backtracking search"
)]
struct Cli {
    /// Board dimensions in mm (WxH, e.g. 2440x1220)
    #[arg(long)]
    board: String,

    /// Details as NAME:WxH:QTY (e.g. shelf:600x300:4 door:1800x600:2)
    #[arg(long = "details", num_args = 1..)]
    details: Vec<String>,

    /// Give up after this many milliseconds
    #[arg(long, default_value_t = 5000)]
    time_limit_ms: u64,

    /// Log search progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let board = parse_board(&cli.board).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let requests: Vec<DetailRequest> = cli
        .details
        .iter()
        .map(|d| parse_detail(d))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    if let Err(e) = validate(&board, &requests) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let cutter = Cutter::new(board, expand(&requests))
        .with_time_limit(Duration::from_millis(cli.time_limit_ms));

    let solution = match cutter.solve() {
        Outcome::Solved(solution) => solution,
        Outcome::Exhausted => {
            println!("No arrangement exists for these details on a {} board.", board);
            std::process::exit(2);
        }
        Outcome::TimedOut => {
            println!("No arrangement found within {} ms.", cli.time_limit_ms);
            std::process::exit(2);
        }
    };

    println!("Solution found:");
    for p in &solution.placements {
        let rot = if p.rotated { " (rotated)" } else { "" };
        println!("-> {} at ({}, {}){}", p.detail.name, p.x, p.y, rot);
    }
    println!();
    println!("Used area: {} sq. mm", solution.used_area());
    println!("Material used: {:.2}%", solution.utilization_percent());
    println!("Waste: {} sq. mm", solution.waste_area());
}
