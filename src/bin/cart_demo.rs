//! Qualitative cart control demo.
//!
//! Drives a 1-D cart from an offset start position to the origin using the
//! qualitative actor, over several episodes. Learned velocity and
//! acceleration extrema carry across episodes, so later episodes brake
//! earlier and arrive sooner.
//!
//! # Usage
//!
//! ```bash
//! # 10 episodes with the defaults from the cart task
//! cargo run --bin cart_demo
//!
//! # Jittered start positions and a JSON summary
//! cargo run --bin cart_demo -- --jitter 2.0 --seed 7 --json
//! ```

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use qactor::model::CartModel;
use qactor::sim::{run_cart_episode, CartSimulator, EpisodeConfig};
use qactor::QualitativeActor;

#[derive(Parser)]
#[command(name = "cart_demo")]
#[command(version, about = "Qualitative-reasoning cart control demo", long_about = None)]
struct Cli {
    /// Number of episodes to run (learned extrema persist across episodes)
    #[arg(long, default_value = "10")]
    episodes: usize,

    /// Control steps per episode
    #[arg(long, default_value = "400")]
    steps: usize,

    /// Time step per control cycle (seconds)
    #[arg(long, default_value = "0.01")]
    dt: f64,

    /// Cart mass
    #[arg(long, default_value = "1.0")]
    mass: f64,

    /// Initial cart position
    #[arg(long, default_value = "-10.0")]
    start: f64,

    /// Uniform jitter applied to the start position each episode
    #[arg(long, default_value = "0.0")]
    jitter: f64,

    /// RNG seed for the start jitter
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print a JSON summary of all episode reports at the end
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut actor = QualitativeActor::new(CartModel);
    let mut sim = CartSimulator::new(cli.mass, cli.start);
    let config = EpisodeConfig {
        steps: cli.steps,
        dt: cli.dt,
        ..Default::default()
    };

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let mut reports = Vec::with_capacity(cli.episodes);

    for episode in 0..cli.episodes {
        if cli.jitter > 0.0 {
            let offset = rng.gen_range(-cli.jitter..=cli.jitter);
            sim.reset_at(cli.start + offset);
        }

        let report = run_cart_episode(&mut actor, &mut sim, &config)?;
        match report.goal_time {
            Some(t) => info!(episode, goal_time = t, "goal reached"),
            None => warn!(
                episode,
                final_position = report.final_position,
                "goal not reached"
            ),
        }
        reports.push(report);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
