//! Operator bindings.
//!
//! | Input                       | Action                                      |
//! |-----------------------------|---------------------------------------------|
//! | left stick Y, right stick X | arcade drive (default, every tick)          |
//! | right trigger > 0.5         | shooter percent run, curve applied per tick |
//! | `a` pressed                 | `release_ball()`                            |
//! | `b` pressed                 | start shoot-when-at-speed, again to cancel  |
//!
//! Buttons act on the rising edge only.

use super::input::{OperatorInput, trigger_to_percent};
use super::run::RunHandle;
use super::shoot::ShootWhenAtSpeed;
use crate::subsystems::{Drive, Shooter};
use tracing::debug;

/// Trigger travel the axis must exceed to count as pressed.
///
/// Below it the shooter is left alone, so the curve only ever sees axes in
/// (0.5, 1.0], i.e. percents in (0.25, 0.6].
pub const TRIGGER_THRESHOLD: f64 = 0.5;

/// Input-to-command mapping with the state it needs between ticks.
#[derive(Debug, Default)]
pub struct Bindings {
    /// Percent run held while the trigger is down.
    trigger_run: Option<RunHandle>,
    /// Pending wait-then-release task.
    shoot_task: Option<ShootWhenAtSpeed>,
    /// Previous snapshot, for edge detection.
    previous: OperatorInput,
}

impl Bindings {
    /// No runs, no tasks, neutral previous input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one tick of operator input.
    pub fn apply(&mut self, input: &OperatorInput, drive: &mut Drive, shooter: &mut Shooter) {
        drive.arcade_drive(-input.left_y, -input.right_x);

        if input.right_trigger > TRIGGER_THRESHOLD {
            let percent = trigger_to_percent(input.right_trigger);
            match &self.trigger_run {
                // A superseded run stays ended until the trigger is released.
                Some(handle) => {
                    shooter.update_percent(handle, percent);
                }
                None => self.trigger_run = Some(shooter.run_percent(percent)),
            }
        } else if let Some(handle) = self.trigger_run.take() {
            shooter.finish(handle);
        }

        if input.a && !self.previous.a {
            shooter.release_ball();
        }

        if input.b && !self.previous.b {
            match self.shoot_task.take() {
                Some(mut task) => task.cancel(),
                None => {
                    debug!("Shoot-when-at-speed armed");
                    self.shoot_task = Some(shooter.shoot_when_at_speed());
                }
            }
        }

        if let Some(task) = self.shoot_task.as_mut() {
            task.poll(shooter);
            if task.is_finished() {
                self.shoot_task = None;
            }
        }

        self.previous = *input;
    }

    /// End the trigger run and drop any pending task.
    pub fn reset(&mut self, shooter: &mut Shooter) {
        if let Some(handle) = self.trigger_run.take() {
            shooter.interrupt(handle);
        }
        if let Some(mut task) = self.shoot_task.take() {
            task.cancel();
        }
        self.previous = OperatorInput::default();
    }

    /// A trigger run handle is held.
    pub fn has_trigger_run(&self) -> bool {
        self.trigger_run.is_some()
    }

    /// A wait-then-release task is pending.
    pub fn has_shoot_task(&self) -> bool {
        self.shoot_task.is_some()
    }
}
