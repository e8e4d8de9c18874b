//! Fixed-rate cycle runner.
//!
//! Paces a tick body at the configured period using absolute deadlines
//! (`next += period`) so short jitter does not accumulate as drift. A tick
//! that overruns its period is counted and the schedule restarts from now
//! instead of firing a burst of catch-up ticks.
//!
//! Overruns are logged at WARN at most once per [`OVERRUN_LOG_INTERVAL`];
//! the suppressed count is reported with the next message.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Minimum spacing between overrun warnings.
pub const OVERRUN_LOG_INTERVAL: Duration = Duration::from_secs(1);

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-cycle timing statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// Last tick body duration [ns].
    pub last_cycle_ns: u64,
    /// Maximum tick body duration [ns].
    pub max_cycle_ns: u64,
    /// Running sum for average computation [ns].
    pub sum_cycle_ns: u64,
    /// Ticks whose body took longer than the period.
    pub overruns: u64,
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleStats {
    /// Zeroed stats.
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
        }
    }

    /// Record one tick body duration.
    #[inline]
    pub fn record(&mut self, duration_ns: u64) {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns = self.sum_cycle_ns.saturating_add(duration_ns);
    }

    /// Average tick body duration [ns] (0 if no cycles).
    #[inline]
    pub fn avg_cycle_ns(&self) -> u64 {
        self.sum_cycle_ns.checked_div(self.cycle_count).unwrap_or(0)
    }
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// Runs a tick body at a fixed period until stopped.
pub struct CycleRunner {
    period: Duration,
    running: Arc<AtomicBool>,
    max_cycles: Option<u64>,
    stats: CycleStats,
    last_overrun_log: Option<Instant>,
    suppressed_overruns: u64,
}

impl CycleRunner {
    /// Runner with `period`, stopping once `running` is cleared.
    pub fn new(period: Duration, running: Arc<AtomicBool>) -> Self {
        Self {
            period,
            running,
            max_cycles: None,
            stats: CycleStats::new(),
            last_overrun_log: None,
            suppressed_overruns: 0,
        }
    }

    /// Also stop after `max_cycles` ticks (`None` = unbounded).
    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// Timing statistics so far.
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Configured period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run `body` once per period until stopped.
    pub fn run<F: FnMut()>(&mut self, mut body: F) -> &CycleStats {
        info!(
            period_ms = self.period.as_secs_f64() * 1e3,
            max_cycles = ?self.max_cycles,
            "Cycle loop started"
        );
        let mut next_wake = Instant::now();

        while self.running.load(Ordering::SeqCst) && !self.budget_spent() {
            let cycle_start = Instant::now();
            body();
            let elapsed = cycle_start.elapsed();
            self.stats
                .record(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX));

            next_wake += self.period;
            let now = Instant::now();
            if elapsed > self.period {
                self.on_overrun(elapsed, now);
                next_wake = now;
            } else if let Some(remaining) = next_wake.checked_duration_since(now) {
                std::thread::sleep(remaining);
            } else {
                // Late wake-up without a long body: resync.
                next_wake = now;
            }
        }

        info!(
            cycles = self.stats.cycle_count,
            avg_us = self.stats.avg_cycle_ns() / 1000,
            max_us = self.stats.max_cycle_ns / 1000,
            overruns = self.stats.overruns,
            "Cycle loop stopped"
        );
        &self.stats
    }

    fn budget_spent(&self) -> bool {
        self.max_cycles
            .is_some_and(|max| self.stats.cycle_count >= max)
    }

    fn on_overrun(&mut self, elapsed: Duration, now: Instant) {
        self.stats.overruns += 1;
        let due = self
            .last_overrun_log
            .is_none_or(|last| now.duration_since(last) >= OVERRUN_LOG_INTERVAL);
        if due {
            warn!(
                cycle = self.stats.cycle_count,
                elapsed_us = elapsed.as_micros() as u64,
                budget_us = self.period.as_micros() as u64,
                suppressed = self.suppressed_overruns,
                "Cycle overrun"
            );
            self.last_overrun_log = Some(now);
            self.suppressed_overruns = 0;
        } else {
            self.suppressed_overruns += 1;
            debug!(cycle = self.stats.cycle_count, "Cycle overrun (suppressed)");
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
