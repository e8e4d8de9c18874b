//! Integration test: operator bindings through the robot container.

use super::support::{IoCall, MemorySink, Recorder};
use ballista_control::OperatorInput;
use ballista_control::Robot;
use ballista_control::command::input::{InputLatch, trigger_to_percent};
use ballista_control::subsystems::ShooterRun;
use ballista_control::telemetry::{DRIVE_KEY, SHOOTER_KEY};
use std::sync::mpsc;

fn robot() -> (Robot, Recorder, MemorySink) {
    let recorder = Recorder::new();
    let sink = MemorySink::default();
    let robot = Robot::new(
        (recorder.drive_io(), recorder.shooter_io()),
        Box::new(sink.clone()),
    );
    (robot, recorder, sink)
}

fn trigger(value: f64) -> OperatorInput {
    OperatorInput {
        right_trigger: value,
        ..Default::default()
    }
}

#[test]
fn default_command_is_inverted_arcade() {
    let (mut robot, recorder, _sink) = robot();
    robot.periodic(&OperatorInput {
        left_y: -0.5,
        right_x: 0.25,
        ..Default::default()
    });
    // forward = 0.5, turn = -0.25
    assert_eq!(recorder.calls()[0], IoCall::DriveVoltage(3.0, 9.0));
    assert_eq!(robot.drive().telemetry().left_applied_volts, 3.0);
}

#[test]
fn trigger_holds_percent_run_and_releases_to_zero() {
    let (mut robot, recorder, _sink) = robot();

    robot.periodic(&trigger(0.75));
    assert_eq!(
        robot.shooter().active_run(),
        Some(ShooterRun::Percent(trigger_to_percent(0.75)))
    );

    // Moving the trigger updates the same run every tick.
    robot.periodic(&trigger(1.0));
    assert_eq!(robot.shooter().active_run(), Some(ShooterRun::Percent(0.6)));
    assert!(robot.bindings().has_trigger_run());

    robot.periodic(&trigger(0.0));
    assert!(robot.shooter().active_run().is_none());
    assert!(!robot.bindings().has_trigger_run());

    assert_eq!(
        recorder.shooter_calls(),
        vec![
            IoCall::ShooterVoltage(12.0 * 0.5625),
            IoCall::ShooterVoltage(12.0 * 0.6),
            IoCall::ShooterVoltage(0.0),
        ]
    );
}

#[test]
fn trigger_at_or_below_threshold_does_nothing() {
    let (mut robot, recorder, _sink) = robot();
    robot.periodic(&trigger(0.5));
    robot.periodic(&trigger(0.05));
    robot.periodic(&trigger(0.01));
    assert!(recorder.shooter_calls().is_empty());
    assert!(robot.shooter().active_run().is_none());
}

#[test]
fn partial_trigger_press_leaves_shooter_idle() {
    let (mut robot, recorder, _sink) = robot();
    robot.periodic(&trigger(0.3));
    assert!(recorder.shooter_calls().is_empty());
    assert!(robot.shooter().active_run().is_none());
    assert!(!robot.bindings().has_trigger_run());

    // Crossing the threshold starts the run from the full axis value.
    robot.periodic(&trigger(0.6));
    assert_eq!(
        robot.shooter().active_run(),
        Some(ShooterRun::Percent(trigger_to_percent(0.6)))
    );

    // Dropping back under the threshold ends it.
    robot.periodic(&trigger(0.3));
    assert!(robot.shooter().active_run().is_none());
    assert_eq!(
        recorder.shooter_calls().last(),
        Some(&IoCall::ShooterVoltage(0.0))
    );
}

#[test]
fn superseded_trigger_run_is_not_restarted_while_held() {
    let (mut robot, recorder, _sink) = robot();
    robot.periodic(&trigger(0.8));

    let external = robot.shooter_mut().run_velocity(40.0);
    robot.periodic(&trigger(0.8));
    assert_eq!(robot.shooter().active_run(), Some(ShooterRun::Velocity(40.0)));

    // Releasing the trigger does not touch the velocity run.
    robot.periodic(&trigger(0.0));
    assert_eq!(robot.shooter().active_run(), Some(ShooterRun::Velocity(40.0)));
    assert_eq!(
        recorder.shooter_calls().last(),
        Some(&IoCall::ShooterVelocity(40.0))
    );
    robot.shooter_mut().finish(external);
}

#[test]
fn a_button_releases_on_rising_edge_only() {
    let (mut robot, recorder, _sink) = robot();
    let pressed = OperatorInput {
        a: true,
        ..Default::default()
    };
    robot.periodic(&pressed);
    robot.periodic(&pressed);
    robot.periodic(&pressed);
    robot.periodic(&OperatorInput::default());
    robot.periodic(&pressed);

    let releases = recorder
        .calls()
        .iter()
        .filter(|call| **call == IoCall::Release)
        .count();
    assert_eq!(releases, 2);
}

#[test]
fn quick_tap_between_ticks_still_releases() {
    let (mut robot, recorder, _sink) = robot();
    let (tx, rx) = mpsc::channel();
    let mut latch = InputLatch::new(rx);

    tx.send(OperatorInput {
        a: true,
        ..Default::default()
    })
    .unwrap();
    tx.send(OperatorInput::default()).unwrap();
    robot.periodic(&latch.poll());
    robot.periodic(&latch.poll());

    let releases = recorder
        .calls()
        .iter()
        .filter(|call| **call == IoCall::Release)
        .count();
    assert_eq!(releases, 1);
}

#[test]
fn b_button_arms_and_cancels_shoot_task() {
    let (mut robot, recorder, _sink) = robot();
    let b = OperatorInput {
        b: true,
        ..Default::default()
    };
    let run = robot.shooter_mut().run_velocity(100.0);
    recorder.set_measured(10.0);
    robot.periodic(&OperatorInput::default());

    robot.periodic(&b);
    assert!(robot.bindings().has_shoot_task());
    robot.periodic(&OperatorInput::default());
    robot.periodic(&b);
    assert!(!robot.bindings().has_shoot_task());

    recorder.set_measured(100.0);
    for _ in 0..5 {
        robot.periodic(&OperatorInput::default());
    }
    assert!(!recorder.calls().contains(&IoCall::Release));
    robot.shooter_mut().finish(run);
}

#[test]
fn b_button_task_fires_when_at_speed() {
    let (mut robot, recorder, _sink) = robot();
    let run = robot.shooter_mut().run_velocity(100.0);
    recorder.set_measured(10.0);
    robot.periodic(&OperatorInput::default());

    robot.periodic(&OperatorInput {
        b: true,
        ..Default::default()
    });
    assert!(robot.bindings().has_shoot_task());

    recorder.set_measured(100.0);
    // One tick to refresh telemetry, one for the task to see it.
    robot.periodic(&OperatorInput::default());
    robot.periodic(&OperatorInput::default());
    assert!(!robot.bindings().has_shoot_task());
    assert!(recorder.calls().contains(&IoCall::Release));
    robot.shooter_mut().finish(run);
}

#[test]
fn telemetry_published_under_subsystem_keys() {
    let (mut robot, recorder, sink) = robot();
    recorder.set_measured(12.0);
    robot.periodic(&OperatorInput::default());
    robot.periodic(&OperatorInput::default());

    let records = sink.records.lock().clone();
    let keys: Vec<&str> = records.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec![DRIVE_KEY, SHOOTER_KEY, DRIVE_KEY, SHOOTER_KEY]);
    assert_eq!(records[1].1["velocity_rad_per_sec"], 12.0);
}

#[test]
fn disable_ends_runs_and_zeroes_drive() {
    let (mut robot, recorder, _sink) = robot();
    robot.periodic(&OperatorInput {
        left_y: -1.0,
        right_trigger: 0.7,
        ..Default::default()
    });
    robot.disable();

    assert!(robot.shooter().active_run().is_none());
    let calls = recorder.calls();
    assert!(calls.contains(&IoCall::ShooterVoltage(0.0)));
    assert_eq!(calls.last(), Some(&IoCall::DriveVoltage(0.0, 0.0)));
}
