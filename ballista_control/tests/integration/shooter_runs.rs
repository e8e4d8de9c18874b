//! Integration test: scoped shooter runs.
//!
//! Every exit path of a run (finish, interrupt, supersession, dropped handle)
//! issues the run's stop action exactly once.

use super::support::{IoCall, Recorder};
use ballista_control::subsystems::{Shooter, ShooterRun};

fn shooter() -> (Shooter, Recorder) {
    let recorder = Recorder::new();
    (Shooter::new(recorder.shooter_io()), recorder)
}

#[test]
fn run_percent_scales_nominal_voltage() {
    let (mut shooter, recorder) = shooter();
    let run = shooter.run_percent(0.25);
    assert_eq!(recorder.calls(), vec![IoCall::ShooterVoltage(3.0)]);
    shooter.finish(run);
    assert_eq!(recorder.calls().last(), Some(&IoCall::ShooterVoltage(0.0)));
}

#[test]
fn interrupted_velocity_run_zeroes_velocity_next() {
    let (mut shooter, recorder) = shooter();
    let run = shooter.run_velocity(50.0);
    recorder.clear();

    assert!(shooter.interrupt(run));
    assert_eq!(recorder.calls(), vec![IoCall::ShooterVelocity(0.0)]);
}

#[test]
fn finished_velocity_run_zeroes_velocity() {
    let (mut shooter, recorder) = shooter();
    let run = shooter.run_velocity(-20.0);
    assert!(shooter.finish(run));
    assert_eq!(
        recorder.calls(),
        vec![IoCall::ShooterVelocity(-20.0), IoCall::ShooterVelocity(0.0)]
    );
}

#[test]
fn supersession_stops_previous_run_first() {
    let (mut shooter, recorder) = shooter();
    let percent = shooter.run_percent(0.5);
    let velocity = shooter.run_velocity(80.0);

    assert_eq!(
        recorder.calls(),
        vec![
            IoCall::ShooterVoltage(6.0),
            IoCall::ShooterVoltage(0.0),
            IoCall::ShooterVelocity(80.0),
        ]
    );
    assert!(!percent.is_active());
    assert!(velocity.is_active());
    assert_eq!(shooter.active_run(), Some(ShooterRun::Velocity(80.0)));

    // Ending the superseded run again does nothing.
    assert!(!shooter.finish(percent));
    assert_eq!(recorder.calls().len(), 3);
    shooter.finish(velocity);
}

#[test]
fn dropped_handle_stops_at_next_periodic_once() {
    let (mut shooter, recorder) = shooter();
    let run = shooter.run_velocity(60.0);
    drop(run);

    // Nothing happens until the next tick.
    assert_eq!(recorder.calls(), vec![IoCall::ShooterVelocity(60.0)]);

    shooter.periodic();
    assert_eq!(
        recorder.calls(),
        vec![IoCall::ShooterVelocity(60.0), IoCall::ShooterVelocity(0.0)]
    );
    assert!(shooter.active_run().is_none());

    shooter.periodic();
    shooter.periodic();
    assert_eq!(recorder.calls().len(), 2);
}

#[test]
fn reaped_run_is_stopped_before_refresh() {
    let (mut shooter, recorder) = shooter();
    recorder.set_measured(10.0);
    let run = shooter.run_velocity(10.0);
    shooter.periodic();
    assert_eq!(shooter.telemetry().target_velocity, 10.0);

    drop(run);
    shooter.periodic();
    // The refresh in the same tick already sees the zeroed target.
    assert_eq!(shooter.telemetry().target_velocity, 0.0);
}

#[test]
fn stop_action_runs_once_across_all_paths() {
    let (mut shooter, recorder) = shooter();

    let a = shooter.run_percent(0.1);
    let b = shooter.run_percent(0.2); // supersedes a
    shooter.interrupt(b);
    shooter.finish(a); // already ended
    let c = shooter.run_velocity(5.0);
    drop(c);
    shooter.periodic();
    shooter.stop(); // nothing active

    let stops = recorder
        .calls()
        .into_iter()
        .filter(|call| {
            matches!(
                call,
                IoCall::ShooterVoltage(v) | IoCall::ShooterVelocity(v) if *v == 0.0
            )
        })
        .count();
    assert_eq!(stops, 3);
}
