//! Cascade Simulation Harness
//!
//! Runs the reference supply network forward under a seeded RNG, injecting
//! news shocks on a fixed cadence.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cascade_core::{create_reference_network, CascadeError, EngineConfig, Session};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "cascade_sim")]
#[command(about = "Cascading failure simulation over a small supply network")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of propagation steps to run
    #[arg(long, default_value_t = 10)]
    steps: u64,

    /// Inject a news event every N steps (0 disables news)
    #[arg(long, default_value_t = 2)]
    event_interval: u64,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Unit ids to pulse before the first step
    #[arg(long = "pulse")]
    pulses: Vec<String>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();

    if args.print_default_config {
        print!("{}", cascade_core::default_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CascadeError> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    println!("Cascade Simulation");
    println!("==================");
    println!("Seed: {}", args.seed);
    println!("Steps: {}", args.steps);
    println!("Event interval: {}", args.event_interval);
    println!();

    let state = create_reference_network(&config.propagation);
    let mut session = Session::new(state, config);
    let mut rng = SmallRng::seed_from_u64(args.seed);

    for target in &args.pulses {
        let pulse = session.pulse(target)?;
        println!("Pulsed {} with intensity {:.4}", target, pulse);
    }

    for step in 1..=args.steps {
        if args.event_interval > 0 && step % args.event_interval == 0 {
            let event = session.ingest_random(&mut rng);
            println!(
                "  News: {} -> {} (+{:.3})",
                event.source,
                event.impact_node_id,
                event.effective_impact()
            );
        }

        let census = session.propagate(&mut rng);
        println!(
            "Step {:>3}: stable {} / stressed {} / collapsed {}",
            step, census.stable, census.stressed, census.collapsed
        );

        if census.collapsed == census.total() {
            println!("Network fully collapsed after {} steps", step);
            break;
        }
    }

    println!();
    println!("Log feed:");
    for line in session.logs() {
        println!("  {}", line);
    }

    if args.json {
        match session.state().to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Could not serialize final snapshot: {}", e),
        }
    }

    Ok(())
}
