//! Operator input.
//!
//! - [`OperatorInput`] - One controller snapshot
//! - [`trigger_to_percent`] - Trigger axis → shooter percent curve
//! - [`spawn_reader`] / [`InputLatch`] - JSON-lines source on a reader thread
//!
//! The reader thread is the only thread besides the control loop. It parses
//! one JSON object per line and sends complete snapshots through a channel;
//! the control loop drains the channel once per tick and keeps the newest,
//! with buttons held if any drained snapshot had them down.

use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::{debug, info, warn};

/// Ceiling of the trigger percent curve.
pub const MAX_TRIGGER_PERCENT: f64 = 0.6;

/// One snapshot of the operator controller.
///
/// Axes are in [-1, 1] with stick-up negative on `left_y`. Missing JSON
/// fields default to neutral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorInput {
    /// Left stick vertical axis
    pub left_y: f64,
    /// Right stick horizontal axis
    pub right_x: f64,
    /// Right trigger axis, 0 released
    pub right_trigger: f64,
    /// `a` button held
    pub a: bool,
    /// `b` button held
    pub b: bool,
}

/// Map a trigger axis `a` to a shooter percent: `min(sign(a)·a², 0.6)`.
///
/// Squaring keeps fine control near zero; the sign survives for negative
/// axes. Only the upper end is capped.
#[inline]
pub fn trigger_to_percent(a: f64) -> f64 {
    (a.signum() * a * a).min(MAX_TRIGGER_PERCENT)
}

/// Parse JSON-lines snapshots from `reader` on a background thread.
///
/// Malformed lines are logged and skipped. The channel disconnects when the
/// reader reaches EOF or fails.
pub fn spawn_reader<R>(reader: R) -> Receiver<OperatorInput>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (index, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Operator input read failed");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<OperatorInput>(&line) {
                Ok(input) => {
                    if tx.send(input).is_err() {
                        break;
                    }
                }
                Err(e) => warn!(line = index + 1, error = %e, "Malformed operator input"),
            }
        }
        debug!("Operator input reader finished");
    });
    rx
}

/// Holds the newest operator snapshot for the control loop.
///
/// Once the source disconnects the latch falls back to neutral input, so a
/// held trigger or stick cannot outlive its source.
pub struct InputLatch {
    rx: Receiver<OperatorInput>,
    latest: OperatorInput,
    connected: bool,
}

impl InputLatch {
    /// Latch over `rx`, starting from neutral input.
    pub fn new(rx: Receiver<OperatorInput>) -> Self {
        Self {
            rx,
            latest: OperatorInput::default(),
            connected: true,
        }
    }

    /// Drain pending snapshots and return the newest.
    ///
    /// A button that was down in any snapshot drained by this call reads as
    /// held for this tick, so a press and release between two ticks still
    /// produces one rising edge. The next poll reports the newest state.
    pub fn poll(&mut self) -> OperatorInput {
        let mut a = false;
        let mut b = false;
        while self.connected {
            match self.rx.try_recv() {
                Ok(input) => {
                    a |= input.a;
                    b |= input.b;
                    self.latest = input;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("Operator input disconnected, holding neutral");
                    self.connected = false;
                    self.latest = OperatorInput::default();
                    a = false;
                    b = false;
                }
            }
        }
        OperatorInput {
            a: self.latest.a || a,
            b: self.latest.b || b,
            ..self.latest
        }
    }

    /// The source is still attached.
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
