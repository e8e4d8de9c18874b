//! Integration test: drivetrain controller over recording and simulated IO.

use super::support::{IoCall, Recorder};
use ballista_common::hal::config::SimConfig;
use ballista_control::subsystems::Drive;
use ballista_hal::ManualClock;
use ballista_hal::drivers::simulation::SimDriveIo;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn stop_is_idempotent() {
    let recorder = Recorder::new();
    let mut drive = Drive::new(recorder.drive_io());

    drive.run_open_loop(5.0, -5.0);
    drive.stop();
    drive.periodic();
    let once = *drive.telemetry();

    drive.stop();
    drive.stop();
    drive.periodic();
    assert_eq!(*drive.telemetry(), once);
    assert_eq!(once.left_applied_volts, 0.0);
    assert_eq!(once.right_applied_volts, 0.0);
    assert!(
        recorder.calls()[1..]
            .iter()
            .all(|call| *call == IoCall::DriveVoltage(0.0, 0.0))
    );
}

#[test]
fn open_loop_forwards_without_clamping() {
    let recorder = Recorder::new();
    let mut drive = Drive::new(recorder.drive_io());
    drive.run_open_loop(18.0, -0.5);
    assert_eq!(recorder.calls(), vec![IoCall::DriveVoltage(18.0, -0.5)]);
}

#[test]
fn telemetry_only_changes_on_periodic() {
    let clock = Arc::new(ManualClock::new());
    let mut drive = Drive::new(Box::new(SimDriveIo::new(&SimConfig::default(), clock.clone())));

    drive.periodic();
    drive.arcade_drive(0.5, 0.0);
    assert_eq!(drive.telemetry().left_applied_volts, 0.0);

    clock.advance(Duration::from_millis(20));
    drive.periodic();
    assert_eq!(drive.telemetry().left_applied_volts, 6.0);
    assert_eq!(drive.telemetry().right_applied_volts, 6.0);
    assert!(drive.telemetry().left_current_amps[0] > 0.0);
}
