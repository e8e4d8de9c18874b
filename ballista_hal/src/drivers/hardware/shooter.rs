//! Flywheel shooter with a timed release motor.

use crate::bus::{
    ControlRequest, MotorBus, MotorController, MotorSettings, NeutralMode, try_until_ok,
};
use crate::clock::Clock;
use crate::release::ReleaseCycle;
use ballista_common::consts::NOMINAL_VOLTAGE;
use ballista_common::hal::config::ShooterConfig;
use ballista_common::hal::io::ShooterIo;
use ballista_common::hal::types::ShooterTelemetry;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Shooter IO backed by motor controllers on a bus.
///
/// The flywheel runs its onboard velocity loop; the release motor is driven
/// by duty cycle and held in brake between releases.
pub struct HardwareShooterIo<M> {
    flywheel: M,
    release: M,
    release_cycle: ReleaseCycle,
    /// Last closed-loop target [rad/s], 0 when open loop
    target_velocity: f64,
    clock: Arc<dyn Clock>,
}

impl<M: MotorController> HardwareShooterIo<M> {
    /// Open and configure the flywheel and release controllers.
    pub fn new<B>(bus: &mut B, config: &ShooterConfig, clock: Arc<dyn Clock>) -> Self
    where
        B: MotorBus<Motor = M>,
    {
        let mut flywheel = bus.motor(config.flywheel_id);
        let mut release = bus.motor(config.release_id);

        let flywheel_settings = MotorSettings {
            voltage_compensation: Some(NOMINAL_VOLTAGE),
            velocity_gains: Some(config.gains),
            ..MotorSettings::default()
        };
        let release_settings = MotorSettings {
            neutral_mode: NeutralMode::Brake,
            ..MotorSettings::default()
        };

        try_until_ok(config.config_attempts, "flywheel", || {
            flywheel.configure(&flywheel_settings)
        });
        try_until_ok(config.config_attempts, "release", || {
            release.configure(&release_settings)
        });

        info!(
            flywheel = config.flywheel_id,
            release = config.release_id,
            "Hardware shooter configured"
        );

        Self {
            flywheel,
            release,
            release_cycle: ReleaseCycle::new(),
            target_velocity: 0.0,
            clock,
        }
    }
}

impl<M: MotorController> ShooterIo for HardwareShooterIo<M> {
    fn name(&self) -> &'static str {
        "hardware"
    }

    fn refresh(&mut self, telemetry: &mut ShooterTelemetry) {
        if self.release_cycle.poll(self.clock.now()) {
            self.release.set_control(ControlRequest::DutyCycle(0.0));
        }

        telemetry.position_rad = self.flywheel.position();
        telemetry.velocity_rad_per_sec = self.flywheel.velocity();
        telemetry.applied_volts = self.flywheel.applied_duty() * self.flywheel.bus_voltage();
        telemetry.current_amps = self.flywheel.stator_current();
        telemetry.target_velocity = self.target_velocity;
        telemetry.release_active = self.release_cycle.is_active();
        telemetry.release_output = self.release_cycle.output();
    }

    fn set_voltage(&mut self, volts: f64) {
        trace!(volts, "Flywheel voltage");
        self.target_velocity = 0.0;
        self.flywheel
            .set_control(ControlRequest::DutyCycle(volts / NOMINAL_VOLTAGE));
    }

    fn set_velocity(&mut self, target: f64) {
        trace!(target, "Flywheel velocity");
        self.target_velocity = target;
        self.flywheel.set_control(ControlRequest::Velocity(target));
    }

    fn request_release(&mut self) {
        if self.release_cycle.request(self.clock.now()) {
            debug!("Release motor engaged");
            self.release
                .set_control(ControlRequest::DutyCycle(self.release_cycle.output()));
        }
    }
}
