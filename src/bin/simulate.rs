//! Combat balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze encounter balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # Default: 1000 forest fights
//!   cargo run --bin simulate -- -n 100 -b swamp -c 3
//!   cargo run --bin simulate -- --boss crypt_lord -l 6
//!   cargo run --bin simulate -- --seed 42          # Reproducible run

use skirmish::combat::Biome;
use skirmish::simulator::{run_simulation, PlayStyle, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, json_path) = parse_args(&args);

    if config.verbosity >= 1 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              SKIRMISH BALANCE SIMULATOR                       ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Party:          {} x level {}", config.party_size, config.party_level);
        println!("  Stamina:        {:.2}", config.stamina);
        match &config.boss {
            Some(boss) => println!("  Boss:           {}", boss),
            None => {
                println!("  Biome:          {}", config.biome.name());
                println!("  Challenge:      CR {}", config.challenge_rating);
            }
        }
        println!("  Max Rounds:     {}", config.max_rounds);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if let Some(path) = json_path {
        match std::fs::write(&path, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", path),
            Err(err) => {
                eprintln!("Failed to write JSON report to {}: {}", path, err);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, Option<String>) {
    let mut config = SimConfig::default();
    let mut json_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-l" | "--level" => {
                if i + 1 < args.len() {
                    config.party_level = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-p" | "--party" => {
                if i + 1 < args.len() {
                    config.party_size = args[i + 1].parse().unwrap_or(4);
                    i += 1;
                }
            }
            "-b" | "--biome" => {
                if i + 1 < args.len() {
                    config.biome = Biome::classify(&args[i + 1]);
                    i += 1;
                }
            }
            "-c" | "--cr" => {
                if i + 1 < args.len() {
                    config.challenge_rating = args[i + 1].parse().unwrap_or(1.0);
                    i += 1;
                }
            }
            "--stamina" => {
                if i + 1 < args.len() {
                    config.stamina = args[i + 1].parse().unwrap_or(1.0);
                    i += 1;
                }
            }
            "--boss" => {
                if i + 1 < args.len() {
                    config.boss = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-r" | "--rounds" => {
                if i + 1 < args.len() {
                    config.max_rounds = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--json" => {
                let path = args
                    .get(i + 1)
                    .filter(|a| !a.starts_with('-'))
                    .cloned();
                if path.is_some() {
                    i += 1;
                }
                json_path = Some(path.unwrap_or_else(|| "sim_report.json".to_string()));
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "--cautious" => {
                config.play_style = PlayStyle::Cautious;
            }
            "--quick" => {
                config = SimConfig::quick_balance_test(config.biome, config.challenge_rating);
            }
            "--solo" => {
                config = SimConfig::solo_test(config.party_level);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, json_path)
}

fn print_help() {
    println!("Skirmish Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulated fights (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -l, --level <L>     Party level, 1-20 (default: 1)");
    println!("    -p, --party <P>     Party size (default: 4)");
    println!("    -b, --biome <B>     Biome, e.g. forest, swamp, ruins (default: forest)");
    println!("    -c, --cr <CR>       World challenge rating (default: 1)");
    println!("    --stamina <S>       Starting stamina, 0-1 (default: 1)");
    println!("    --boss <KEY>        Fight a catalog boss instead of a regular encounter");
    println!("    -r, --rounds <R>    Rounds before a fight times out (default: 200)");
    println!("    --json [FILE]       Save JSON report (default: sim_report.json)");
    println!("    --cautious          Flee in the opening round when outnumbered");
    println!("    --quick             Quick test (100 runs, current biome and CR)");
    println!("    --solo              Solo adventurer at the current level");
    println!("    -v, --verbose       Per-run output");
    println!("    -q, --quiet         Report only");
    println!("    -h, --help          Show this help");
    println!();
    println!("Set RUST_LOG=skirmish=debug for engine diagnostics.");
}
