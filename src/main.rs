use roulette::build_info;
use roulette::config::Config;
use roulette::creatures::{CreatureProvider, MemoryProvider, PokeApiProvider};
use roulette::engine::ProgressionEngine;
use roulette::session::SessionStore;
use roulette::transport::console;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use std::io;

/// Seed for the synthetic dex used by `--offline`.
const OFFLINE_DEX_SEED: u64 = 42;

struct Options {
    offline: bool,
    serve: Option<u16>,
}

fn print_help() {
    println!("Roulette - Chance-Driven Monster Collecting Game\n");
    println!("Usage: roulette [options]\n");
    println!("Options:");
    println!("  --offline        Play against a built-in synthetic dex");
    println!("  --serve[=PORT]   Serve players over WebSocket (web feature)");
    println!("  --version        Show version information");
    println!("  --help           Show this help message\n");
    println!("Console commands: start, team, spin|<id>, fight|<id>, as <id> <command>, quit");
}

fn parse_args(config: &Config) -> Options {
    let mut options = Options {
        offline: config.offline,
        serve: None,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!(
                    "roulette {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--offline" => options.offline = true,
            "--serve" => options.serve = Some(config.port),
            other => match other.strip_prefix("--serve=").map(str::parse::<u16>) {
                Some(Ok(port)) => options.serve = Some(port),
                _ => {
                    eprintln!("Unknown option: {}", other);
                    eprintln!("Run 'roulette --help' for usage.");
                    std::process::exit(1);
                }
            },
        }
    }
    options
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env();
    let options = parse_args(&config);
    tracing::info!(
        offline = options.offline,
        api_url = %config.api_url,
        commit = build_info::BUILD_COMMIT,
        "starting roulette"
    );

    if options.offline {
        play(&config, MemoryProvider::synthetic(OFFLINE_DEX_SEED), options.serve)
    } else {
        play(&config, PokeApiProvider::from_config(&config), options.serve)
    }
}

fn play<P>(config: &Config, provider: P, serve: Option<u16>) -> Result<(), Box<dyn Error>>
where
    P: CreatureProvider + 'static,
{
    let engine = ProgressionEngine::new(SessionStore::new(), provider);

    if let Some(port) = serve {
        return serve_web(engine, port);
    }

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let stdin = io::stdin();
    console::run(&engine, config.player_id, stdin.lock(), io::stdout(), &mut rng)?;
    Ok(())
}

#[cfg(feature = "web")]
fn serve_web<P>(engine: ProgressionEngine<P>, port: u16) -> Result<(), Box<dyn Error>>
where
    P: CreatureProvider + 'static,
{
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(roulette::transport::web::start_web_server(
        port,
        std::sync::Arc::new(engine),
    ))?;
    Ok(())
}

#[cfg(not(feature = "web"))]
fn serve_web<P>(_engine: ProgressionEngine<P>, port: u16) -> Result<(), Box<dyn Error>>
where
    P: CreatureProvider + 'static,
{
    Err(format!("cannot serve on port {port}: built without the `web` feature").into())
}
