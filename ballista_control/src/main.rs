//! # Ballista
//!
//! Robot control loop binary.
//!
//! Loads `robot.toml`, builds the IO pair for the selected hardware mode,
//! reads operator input as JSON lines from stdin and ticks the robot at the
//! configured period until Ctrl-C or until the optional cycle budget is spent.

use ballista_common::config::{ConfigLoader, LogLevel};
use ballista_common::hal::config::{HardwareMode, RobotConfig};
use ballista_control::Robot;
use ballista_control::command::input::{InputLatch, spawn_reader};
use ballista_control::cycle::CycleRunner;
use ballista_control::telemetry::TracingSink;
use ballista_hal::{Clock, MonotonicClock, create_io};
use clap::{Parser, ValueEnum};
use std::io::BufReader;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, error, info, info_span};
use tracing_subscriber::EnvFilter;

/// Hardware mode accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Real,
    Sim,
    Replay,
}

impl From<ModeArg> for HardwareMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Real => HardwareMode::Real,
            ModeArg::Sim => HardwareMode::Sim,
            ModeArg::Replay => HardwareMode::Replay,
        }
    }
}

/// Ballista robot control loop
#[derive(Parser, Debug)]
#[command(name = "ballista")]
#[command(version)]
#[command(about = "Drive and shooter control loop for the Ballista robot")]
struct Args {
    /// Path to the robot configuration TOML.
    #[arg(long, default_value = ballista_common::consts::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Hardware mode; overrides `mode` from the config file.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Stop after this many cycles.
    #[arg(long)]
    cycles: Option<u64>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    // Tracing needs the config's log level, so load first and report after.
    let config = RobotConfig::load(&args.config);
    let configured_level = config.as_ref().ok().map(|c| c.shared.log_level);
    setup_tracing(&args, configured_level);

    info!("Ballista v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = config
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|config| run(&args, config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Ballista shutdown complete");
}

fn run(args: &Args, config: RobotConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let _span = info_span!("robot", service = %config.shared.service_name).entered();

    let mode = args.mode.map_or(config.mode, HardwareMode::from);
    info!(
        "Config OK: {:?}, cycle_time={}ms, mode={}",
        args.config, config.cycle_time_ms, mode
    );

    let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::new());
    let io = create_io(&config, mode, clock)?;
    let mut robot = Robot::new(io, Box::new(TracingSink::new()));

    let mut input = InputLatch::new(spawn_reader(BufReader::new(std::io::stdin())));

    // Setup signal handler for graceful shutdown.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let mut runner = CycleRunner::new(config.cycle_time(), running).with_max_cycles(args.cycles);
    runner.run(|| robot.periodic(&input.poll()));

    robot.disable();
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and the configured level.
fn setup_tracing(args: &Args, configured: Option<LogLevel>) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured
            .unwrap_or_default()
            .as_directive()
            .parse()
            .unwrap_or(Level::INFO)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
