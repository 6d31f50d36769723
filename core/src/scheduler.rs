use std::time::Duration;

use log::debug;

use crate::chip8::Chip8;
use crate::constants::{MAX_CATCH_UP, TIMER_FREQUENCY};
use crate::error::Result;
use crate::keypad::Keypad;

/// What happened during one `Scheduler::advance`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub cycles: u32,
    pub timer_ticks: u32,
}

/// # Scheduler
/// Drives a Chip8 from elapsed wall-clock time.
///
/// Instruction steps run at a configurable rate while the timers tick at a fixed
/// 60Hz, so timer decay doesn't depend on how fast the CPU runs. Both are
/// interleaved in the order they fall due.
///
/// The host measures time and the scheduler never sleeps, which keeps it usable
/// from tests with synthetic durations.
pub struct Scheduler {
    cycle_period: Duration,
    timer_period: Duration,
    // time elapsed but not yet spent on a cycle or a tick
    until_cycle: Duration,
    until_tick: Duration,
}

impl Scheduler {
    pub fn new(instructions_per_second: u32) -> Self {
        let cycle_period = Self::period(instructions_per_second);
        let timer_period = Self::period(TIMER_FREQUENCY);
        Scheduler {
            cycle_period,
            timer_period,
            until_cycle: Duration::ZERO,
            until_tick: Duration::ZERO,
        }
    }

    fn period(frequency: u32) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(frequency.max(1)))
    }

    pub fn cycle_period(&self) -> Duration {
        self.cycle_period
    }

    pub fn timer_period(&self) -> Duration {
        self.timer_period
    }

    /// Runs every cycle and timer tick that fell due during `elapsed`.
    ///
    /// While the Chip8 awaits a key each due cycle polls `keypad` once and the
    /// timers keep ticking. Elapsed time beyond `MAX_CATCH_UP` is dropped.
    pub fn advance(
        &mut self,
        chip8: &mut Chip8,
        keypad: &dyn Keypad,
        elapsed: Duration,
    ) -> Result<Report> {
        let elapsed = if elapsed > MAX_CATCH_UP {
            debug!("dropping {:?} of backlog", elapsed - MAX_CATCH_UP);
            MAX_CATCH_UP
        } else {
            elapsed
        };
        self.until_cycle += elapsed;
        self.until_tick += elapsed;

        let mut report = Report::default();
        loop {
            let cycle_due = self.until_cycle >= self.cycle_period;
            let tick_due = self.until_tick >= self.timer_period;
            // whichever has waited longest past its deadline goes first
            let tick_first = tick_due
                && (!cycle_due
                    || self.until_tick - self.timer_period
                        >= self.until_cycle - self.cycle_period);

            if tick_first {
                self.until_tick -= self.timer_period;
                chip8.advance_timers();
                report.timer_ticks += 1;
            } else if cycle_due {
                self.until_cycle -= self.cycle_period;
                chip8.advance_cpu(keypad)?;
                report.cycles += 1;
            } else {
                break;
            }
        }
        Ok(report)
    }
}
