use anyhow::Context;
use clap::Parser;
use enactive_core::{AgentConfig, Mode, PrimitiveSpec, RunConfig};
use enactive_engine::{Existence, HeartbeatConfig};
use enactive_world::World;
use std::path::PathBuf;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "enactive", author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "ENACTIVE_CONFIG", default_value = "enactive.toml")]
    config: PathBuf,

    /// Engine preset: simple, recursive or constructive
    #[arg(short, long)]
    mode: Option<Mode>,

    /// World to run against
    #[arg(short, long)]
    world: Option<String>,

    /// Number of steps; 0 runs until Ctrl+C
    #[arg(short = 'n', long)]
    steps: Option<u64>,

    /// Seed for the tie-break shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between steps
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Print one JSON object per step instead of text
    #[arg(long)]
    json: bool,

    /// Write the final memory as JSON to this file
    #[arg(long, value_name = "PATH")]
    dump_memory: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// Command-line flags win over the file and the environment.
    fn apply(&self, config: &mut AgentConfig) {
        if let Some(mode) = self.mode {
            config.engine.mode = mode;
        }
        if let Some(seed) = self.seed {
            config.engine.seed = Some(seed);
        }
        if let Some(world) = &self.world {
            config.run.world = world.clone();
        }
        if let Some(steps) = self.steps {
            config.run.steps = steps;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.run.interval_ms = interval_ms;
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    // A file that is there must be usable; only a missing one means defaults.
    let mut config = if args.config.exists() {
        AgentConfig::load(&args.config)
            .with_context(|| format!("Invalid config file: {}", args.config.display()))?
    } else {
        AgentConfig::load_or_default(&args.config)
    };
    args.apply(&mut config);

    let world = World::from_name(&config.run.world)
        .with_context(|| format!("Invalid world in config: {}", config.run.world))?;
    // The stock table only fits the stock worlds; the homeostatic world brings its own.
    let table = if config.primitives == PrimitiveSpec::default_table() {
        world.primitive_table()
    } else {
        config.primitives.clone()
    };
    let engine = config.engine.resolve();

    info!(
        "Starting {:?} agent in the {} world ({} primitives)",
        config.engine.mode,
        world.name(),
        table.len()
    );
    let mut existence =
        Existence::new(&table, world, engine).context("Failed to initialize the agent")?;

    let completed = run(&mut existence, &config.run, args.json).await?;

    let memory = existence.memory();
    info!(
        "Stopped after {} steps: {} interactions, {} composites",
        completed,
        memory.len(),
        memory.composite_count()
    );

    if let Some(path) = &args.dump_memory {
        let json = memory
            .snapshot()
            .to_json_pretty()
            .context("Failed to serialize memory")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write memory dump: {}", path.display()))?;
        info!("Memory written to {}", path.display());
    }

    Ok(())
}

/// Step until the configured count is reached or Ctrl+C arrives.
async fn run(existence: &mut Existence<World>, run: &RunConfig, json: bool) -> anyhow::Result<u64> {
    let heartbeat = HeartbeatConfig::from_millis(run.interval_ms);
    let mut ticker = heartbeat.is_paced().then(|| {
        let mut ticker = tokio::time::interval(heartbeat.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while run.steps == 0 || existence.steps() < run.steps {
        tokio::select! {
            biased;
            signal = &mut ctrl_c => {
                signal.context("Failed to listen for Ctrl+C")?;
                info!("Received Ctrl+C, stopping");
                break;
            }
            _ = pace(&mut ticker) => {}
        }

        let trace = existence.step();
        if json {
            println!("{}", serde_json::to_string(&trace)?);
        } else {
            println!("{:>4}: {}", trace.step, trace);
        }
    }
    Ok(existence.steps())
}

async fn pace(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => tokio::task::yield_now().await,
    }
}
