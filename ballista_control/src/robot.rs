//! Robot container.
//!
//! Owns both controllers, the operator bindings and the telemetry sink.
//! One [`Robot::periodic`] call is one tick:
//!
//! 1. Apply operator bindings (commands run against last tick's telemetry)
//! 2. Tick the drive, then the shooter
//! 3. Publish both snapshots

use crate::command::bindings::Bindings;
use crate::command::input::OperatorInput;
use crate::subsystems::{Drive, Shooter};
use crate::telemetry::{DRIVE_KEY, SHOOTER_KEY, Snapshot, TelemetrySink};
use ballista_hal::IoPair;
use static_assertions::assert_impl_all;
use tracing::info;

/// Competition robot: drivetrain, shooter, bindings and telemetry.
pub struct Robot {
    drive: Drive,
    shooter: Shooter,
    bindings: Bindings,
    sink: Box<dyn TelemetrySink>,
}

assert_impl_all!(Robot: Send);

impl Robot {
    /// Build the robot around an IO pair from the IO factory.
    pub fn new(io: IoPair, sink: Box<dyn TelemetrySink>) -> Self {
        let (drive_io, shooter_io) = io;
        let robot = Self {
            drive: Drive::new(drive_io),
            shooter: Shooter::new(shooter_io),
            bindings: Bindings::new(),
            sink,
        };
        info!(
            drive = robot.drive.io_name(),
            shooter = robot.shooter.io_name(),
            "Robot constructed"
        );
        robot
    }

    /// Run one tick with `input`.
    pub fn periodic(&mut self, input: &OperatorInput) {
        self.bindings
            .apply(input, &mut self.drive, &mut self.shooter);

        self.drive.periodic();
        self.shooter.periodic();

        self.sink
            .record(DRIVE_KEY, Snapshot::Drive(self.drive.telemetry()));
        self.sink
            .record(SHOOTER_KEY, Snapshot::Shooter(self.shooter.telemetry()));
    }

    /// End every run and zero the drivetrain.
    ///
    /// Called once on shutdown; the next IO refresh (if any) sees zero output.
    pub fn disable(&mut self) {
        self.bindings.reset(&mut self.shooter);
        self.shooter.stop();
        self.drive.stop();
        info!("Robot disabled");
    }

    /// Drivetrain controller.
    pub fn drive(&self) -> &Drive {
        &self.drive
    }

    /// Shooter controller.
    pub fn shooter(&self) -> &Shooter {
        &self.shooter
    }

    /// Shooter controller, for commands issued outside the bindings.
    pub fn shooter_mut(&mut self) -> &mut Shooter {
        &mut self.shooter
    }

    /// Operator bindings state.
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}
