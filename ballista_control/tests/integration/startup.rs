//! Integration test: startup sequence.
//!
//! Validates: config loading from a TOML file → validation → IO factory for
//! each hardware mode → robot ticking under the cycle runner.

use super::support::MemorySink;
use ballista_common::config::ConfigLoader;
use ballista_common::hal::config::{HardwareMode, RobotConfig};
use ballista_common::hal::io::HalError;
use ballista_control::cycle::CycleRunner;
use ballista_control::{OperatorInput, Robot};
use ballista_hal::{Clock, ManualClock, create_io};
use std::fs;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use tempfile::TempDir;

const ROBOT_TOML: &str = r#"
cycle_time_ms = 2
mode = "sim"

[shared]
service_name = "startup-test"

[drive]
left_leader_id = 1
left_follower_id = 2
right_leader_id = 3
right_follower_id = 4

[shooter]
flywheel_id = 5
release_id = 6
"#;

fn load_config() -> RobotConfig {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("robot.toml");
    fs::write(&path, ROBOT_TOML).unwrap();
    let config = RobotConfig::load(&path).unwrap();
    config.validate().unwrap();
    config
}

#[test]
fn sim_robot_runs_under_cycle_runner() {
    let config = load_config();
    assert_eq!(config.cycle_time(), Duration::from_millis(2));

    let clock = Arc::new(ManualClock::new());
    let io = create_io(&config, config.mode, clock.clone()).unwrap();
    let sink = MemorySink::default();
    let mut robot = Robot::new(io, Box::new(sink.clone()));
    assert_eq!(robot.drive().io_name(), "simulation");

    let input = OperatorInput {
        left_y: -1.0,
        ..Default::default()
    };
    let running = Arc::new(AtomicBool::new(true));
    let mut runner = CycleRunner::new(config.cycle_time(), running).with_max_cycles(Some(10));
    let stats = runner.run(|| {
        clock.advance(Duration::from_millis(2));
        robot.periodic(&input);
    });

    assert_eq!(stats.cycle_count, 10);
    assert_eq!(sink.records.lock().len(), 20);
    assert_eq!(robot.drive().telemetry().left_applied_volts, 12.0);
    assert!(clock.now() >= Duration::from_millis(20));
}

#[test]
fn replay_robot_keeps_default_telemetry() {
    let config = load_config();
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new());
    let io = create_io(&config, HardwareMode::Replay, clock).unwrap();
    let mut robot = Robot::new(io, Box::new(MemorySink::default()));

    robot.periodic(&OperatorInput {
        left_y: -1.0,
        right_trigger: 1.0,
        a: true,
        ..Default::default()
    });

    assert_eq!(robot.drive().io_name(), "disabled");
    assert_eq!(*robot.drive().telemetry(), Default::default());
    assert_eq!(*robot.shooter().telemetry(), Default::default());
    robot.disable();
}

#[test]
fn real_mode_without_bus_fails_before_the_loop() {
    let config = load_config();
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new());
    let result = create_io(&config, HardwareMode::Real, clock);
    assert!(matches!(result, Err(HalError::BackendUnavailable(_))));
}
