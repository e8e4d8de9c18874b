//! Integration test: readiness predicate and the wait-then-release task.

use super::support::{IoCall, Recorder};
use ballista_common::hal::config::{SimConfig, VelocityGains};
use ballista_control::command::shoot::ShootState;
use ballista_control::subsystems::Shooter;
use ballista_hal::ManualClock;
use ballista_hal::drivers::simulation::SimShooterIo;
use std::sync::Arc;
use std::time::Duration;

fn recording_shooter() -> (Shooter, Recorder) {
    let recorder = Recorder::new();
    (Shooter::new(recorder.shooter_io()), recorder)
}

#[test]
fn readiness_tolerance_boundaries() {
    let (mut shooter, recorder) = recording_shooter();
    let run = shooter.run_velocity(100.0);

    recorder.set_measured(99.95);
    shooter.periodic();
    assert!(shooter.is_at_target_speed());

    recorder.set_measured(99.85);
    shooter.periodic();
    assert!(!shooter.is_at_target_speed());

    recorder.set_measured(100.08);
    shooter.periodic();
    assert!(shooter.is_at_target_speed());

    shooter.finish(run);
}

#[test]
fn cancelled_task_never_releases() {
    let (mut shooter, recorder) = recording_shooter();
    let run = shooter.run_velocity(100.0);
    let mut task = shooter.shoot_when_at_speed();

    recorder.set_measured(40.0);
    shooter.periodic();
    assert_eq!(task.poll(&mut shooter), ShootState::Waiting);
    task.cancel();

    recorder.set_measured(100.0);
    for _ in 0..50 {
        shooter.periodic();
        task.poll(&mut shooter);
    }
    assert!(!recorder.calls().contains(&IoCall::Release));
    shooter.finish(run);
}

#[test]
fn task_fires_on_first_ready_tick_only() {
    let (mut shooter, recorder) = recording_shooter();
    let run = shooter.run_velocity(100.0);
    let mut task = shooter.shoot_when_at_speed();

    for measured in [20.0, 60.0, 95.0, 99.99, 100.0, 100.0] {
        recorder.set_measured(measured);
        shooter.periodic();
        task.poll(&mut shooter);
    }
    let releases = recorder
        .calls()
        .iter()
        .filter(|call| **call == IoCall::Release)
        .count();
    assert_eq!(releases, 1);
    assert_eq!(task.state(), ShootState::Triggered);
    shooter.finish(run);
}

#[test]
fn spin_up_then_release_in_simulation() {
    let clock = Arc::new(ManualClock::new());
    let io = SimShooterIo::new(&SimConfig::default(), VelocityGains::default(), clock.clone());
    let mut shooter = Shooter::new(Box::new(io));

    let run = shooter.run_velocity(150.0);
    shooter.periodic();
    let mut task = shooter.shoot_when_at_speed();

    let mut ticks = 0;
    while task.poll(&mut shooter) == ShootState::Waiting {
        assert!(ticks < 500, "flywheel never reached speed");
        clock.advance(Duration::from_millis(20));
        shooter.periodic();
        ticks += 1;
    }
    assert!(ticks > 1, "released before spinning up");

    shooter.periodic();
    assert!(shooter.telemetry().release_active);
    assert_eq!(shooter.telemetry().target_velocity, 150.0);
    shooter.finish(run);
}
