//! Drivetrain on four motor controllers (two leaders, two followers).

use crate::bus::{
    ControlRequest, CurrentLimit, MotorBus, MotorController, MotorSettings, NeutralMode,
    try_until_ok,
};
use ballista_common::hal::config::DriveConfig;
use ballista_common::hal::io::DriveIo;
use ballista_common::hal::types::DriveTelemetry;
use tracing::{info, trace};

/// Drive IO backed by motor controllers on a bus.
pub struct HardwareDriveIo<M> {
    left_leader: M,
    left_follower: M,
    right_leader: M,
    right_follower: M,
    /// Voltage compensation reference [V]
    voltage_compensation: f64,
}

impl<M: MotorController> HardwareDriveIo<M> {
    /// Open and configure the four drive controllers.
    ///
    /// Every controller gets the same current limit and voltage compensation.
    /// Leaders are inverted per side; followers mirror their leader.
    pub fn new<B>(bus: &mut B, config: &DriveConfig) -> Self
    where
        B: MotorBus<Motor = M>,
    {
        let mut left_leader = bus.motor(config.left_leader_id);
        let mut left_follower = bus.motor(config.left_follower_id);
        let mut right_leader = bus.motor(config.right_leader_id);
        let mut right_follower = bus.motor(config.right_follower_id);

        let base = MotorSettings {
            inverted: false,
            neutral_mode: NeutralMode::Coast,
            voltage_compensation: Some(config.voltage_compensation),
            current_limit: Some(CurrentLimit {
                peak_amps: config.current_limit_amps,
                continuous_amps: config.continuous_current_limit_amps(),
                peak_duration_ms: config.peak_current_duration_ms,
            }),
            velocity_gains: None,
        };
        let attempts = config.config_attempts;

        for (motor, inverted) in [
            (&mut left_leader, config.left_inverted),
            (&mut left_follower, false),
            (&mut right_leader, config.right_inverted),
            (&mut right_follower, false),
        ] {
            let settings = MotorSettings { inverted, ..base };
            let what = format!("drive motor {}", motor.id());
            try_until_ok(attempts, &what, || motor.configure(&settings));
        }

        let leader = left_leader.id();
        try_until_ok(attempts, "left follower", || left_follower.follow(leader));
        let leader = right_leader.id();
        try_until_ok(attempts, "right follower", || right_follower.follow(leader));

        info!(
            left = config.left_leader_id,
            right = config.right_leader_id,
            current_limit = config.current_limit_amps,
            "Hardware drive configured"
        );

        Self {
            left_leader,
            left_follower,
            right_leader,
            right_follower,
            voltage_compensation: config.voltage_compensation,
        }
    }
}

impl<M: MotorController> DriveIo for HardwareDriveIo<M> {
    fn name(&self) -> &'static str {
        "hardware"
    }

    fn refresh(&mut self, telemetry: &mut DriveTelemetry) {
        telemetry.left_applied_volts =
            self.left_leader.applied_duty() * self.left_leader.bus_voltage();
        telemetry.left_current_amps = [
            self.left_leader.stator_current(),
            self.left_follower.stator_current(),
        ];
        telemetry.right_applied_volts =
            self.right_leader.applied_duty() * self.right_leader.bus_voltage();
        telemetry.right_current_amps = [
            self.right_leader.stator_current(),
            self.right_follower.stator_current(),
        ];
    }

    fn set_voltage(&mut self, left_volts: f64, right_volts: f64) {
        // Voltage compensation makes duty a fraction of the reference.
        let left = left_volts / self.voltage_compensation;
        let right = right_volts / self.voltage_compensation;
        trace!(left, right, "Drive duty");
        self.left_leader.set_control(ControlRequest::DutyCycle(left));
        self.right_leader.set_control(ControlRequest::DutyCycle(right));
    }
}
