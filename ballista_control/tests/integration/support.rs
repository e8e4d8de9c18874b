//! Shared fakes: recording IO and an in-memory telemetry sink.

use ballista_common::hal::io::{DriveIo, ShooterIo};
use ballista_common::hal::types::{DriveTelemetry, ShooterTelemetry};
use ballista_control::telemetry::{Snapshot, TelemetrySink};
use parking_lot::Mutex;
use std::sync::Arc;

/// One IO call as seen by the hardware boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IoCall {
    DriveVoltage(f64, f64),
    ShooterVoltage(f64),
    ShooterVelocity(f64),
    Release,
}

pub type CallLog = Arc<Mutex<Vec<IoCall>>>;

/// Drive IO that records every command.
pub struct RecordingDriveIo {
    pub calls: CallLog,
}

impl DriveIo for RecordingDriveIo {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn refresh(&mut self, telemetry: &mut DriveTelemetry) {
        let last = self.calls.lock().iter().rev().find_map(|call| match call {
            IoCall::DriveVoltage(l, r) => Some((*l, *r)),
            _ => None,
        });
        if let Some((left, right)) = last {
            telemetry.left_applied_volts = left;
            telemetry.right_applied_volts = right;
        }
    }

    fn set_voltage(&mut self, left_volts: f64, right_volts: f64) {
        self.calls
            .lock()
            .push(IoCall::DriveVoltage(left_volts, right_volts));
    }
}

/// Shooter IO that records every command and reports a settable velocity.
pub struct RecordingShooterIo {
    pub calls: CallLog,
    pub measured: Arc<Mutex<f64>>,
    target: f64,
}

impl ShooterIo for RecordingShooterIo {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn refresh(&mut self, telemetry: &mut ShooterTelemetry) {
        telemetry.velocity_rad_per_sec = *self.measured.lock();
        telemetry.target_velocity = self.target;
    }

    fn set_voltage(&mut self, volts: f64) {
        self.target = 0.0;
        self.calls.lock().push(IoCall::ShooterVoltage(volts));
    }

    fn set_velocity(&mut self, target: f64) {
        self.target = target;
        self.calls.lock().push(IoCall::ShooterVelocity(target));
    }

    fn request_release(&mut self) {
        self.calls.lock().push(IoCall::Release);
    }
}

/// Handles to a recording IO pair.
pub struct Recorder {
    pub calls: CallLog,
    pub measured: Arc<Mutex<f64>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            measured: Arc::new(Mutex::new(0.0)),
        }
    }

    pub fn drive_io(&self) -> Box<dyn DriveIo> {
        Box::new(RecordingDriveIo {
            calls: self.calls.clone(),
        })
    }

    pub fn shooter_io(&self) -> Box<dyn ShooterIo> {
        Box::new(RecordingShooterIo {
            calls: self.calls.clone(),
            measured: self.measured.clone(),
            target: 0.0,
        })
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> Vec<IoCall> {
        self.calls.lock().clone()
    }

    /// Shooter calls only, in order.
    pub fn shooter_calls(&self) -> Vec<IoCall> {
        self.calls
            .lock()
            .iter()
            .copied()
            .filter(|call| !matches!(call, IoCall::DriveVoltage(..)))
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn set_measured(&self, velocity: f64) {
        *self.measured.lock() = velocity;
    }
}

/// Telemetry sink keeping every record as JSON.
#[derive(Clone, Default)]
pub struct MemorySink {
    pub records: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl TelemetrySink for MemorySink {
    fn record(&mut self, subsystem: &str, snapshot: Snapshot<'_>) {
        let value = serde_json::to_value(snapshot).unwrap();
        self.records.lock().push((subsystem.to_string(), value));
    }
}
