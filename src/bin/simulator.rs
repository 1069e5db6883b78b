//! Roulette Headless Career Simulator
//!
//! Plays careers against the synthetic dex without any transport, always
//! pressing the offered control, and reports how far they get.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --runs N        Careers to play (default: 1000)
//!   --seed N        RNG seed, incremented per career (default: entropy)
//!   --dex-seed N    Synthetic dex seed (default: 42)
//!   --actions N     Action cap per career (default: 500)
//!   --verbose       One line per career
//!   --json          Print the report as JSON
//!   --quiet         Only the final summary line

use roulette::simulator::{run_simulation, SimConfig};

struct Cli {
    sim: SimConfig,
    json: bool,
    quiet: bool,
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|raw| raw.parse().ok()) {
        Some(value) => value,
        None => {
            eprintln!("{flag} requires a number");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_args() -> Cli {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = Cli {
        sim: SimConfig::default(),
        json: false,
        quiet: false,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" | "-n" => {
                i += 1;
                cli.sim.num_runs = parse_number(&args, i, "--runs");
            }
            "--seed" | "-s" => {
                i += 1;
                cli.sim.seed = Some(parse_number(&args, i, "--seed"));
            }
            "--dex-seed" => {
                i += 1;
                cli.sim.dex_seed = parse_number(&args, i, "--dex-seed");
            }
            "--actions" => {
                i += 1;
                cli.sim.max_actions_per_run = parse_number(&args, i, "--actions");
            }
            "--verbose" => cli.sim.verbosity = 2,
            "--json" => cli.json = true,
            "--quiet" => {
                cli.quiet = true;
                cli.sim.verbosity = 0;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    cli
}

fn print_usage() {
    eprintln!(
        "Roulette Headless Career Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N, -n N  Careers to play (default: 1000)\n\
         \x20 --seed N, -s N  RNG seed, incremented per career (default: entropy)\n\
         \x20 --dex-seed N    Synthetic dex seed (default: 42)\n\
         \x20 --actions N     Action cap per career (default: 500)\n\
         \x20 --verbose       One line per career\n\
         \x20 --json          Print the report as JSON\n\
         \x20 --quiet         Only the final summary line\n\
         \x20 --help, -h      Show this help"
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();

    if !cli.quiet {
        eprintln!(
            "Roulette Simulator: {} career(s), seed={}, dex-seed={}, cap={} actions",
            cli.sim.num_runs,
            cli.sim
                .seed
                .map_or_else(|| "entropy".to_string(), |s| s.to_string()),
            cli.sim.dex_seed,
            cli.sim.max_actions_per_run,
        );
    }

    let report = run_simulation(&cli.sim);

    if cli.json {
        println!("{}", report.to_json());
    } else if cli.quiet {
        println!(
            "runs={} victory_rate={:.3} avg_badges={:.2} avg_round={:.2} avg_power={:.2} shinies={}",
            report.num_runs,
            report.victory_rate,
            report.avg_badges,
            report.avg_final_round,
            report.avg_team_power,
            report.total_shinies,
        );
    } else {
        println!("{}", report.to_text());
    }
}
