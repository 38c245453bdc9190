//! Wall-clock budget measurement.
//!
//! Budgets are declared, measured, and reported; work is never preempted
//! or truncated, because parsing is not an interruptible algorithm. An
//! overrun produces a `tracing` warning and a flag the caller can count.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::time::Clock;

/// One measured unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Wall-clock time the unit took.
    pub elapsed: Duration,
    /// Budget it was measured against.
    pub budget: Duration,
    /// True when `elapsed > budget`.
    pub over_budget: bool,
}

/// Measures units of work against a fixed budget.
pub struct BudgetGauge {
    budget: Duration,
    clock: Arc<dyn Clock>,
}

impl BudgetGauge {
    /// Creates a gauge with the given budget.
    pub fn new(budget: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { budget, clock }
    }

    /// Starts measuring one unit of work.
    pub fn start(&self) -> BudgetSpan<'_> {
        BudgetSpan {
            gauge: self,
            started: self.clock.now(),
        }
    }
}

/// An in-flight measurement; consume with [`BudgetSpan::finish`].
pub struct BudgetSpan<'a> {
    gauge: &'a BudgetGauge,
    started: Instant,
}

impl BudgetSpan<'_> {
    /// Stops the measurement and reports an overrun when one occurred.
    pub fn finish(self, label: &str) -> Measurement {
        let elapsed = self.gauge.clock.now().duration_since(self.started);
        let over_budget = elapsed > self.gauge.budget;
        if over_budget {
            warn!(
                label,
                elapsed_us = elapsed.as_micros() as u64,
                budget_us = self.gauge.budget.as_micros() as u64,
                "operation exceeded its time budget"
            );
        }
        Measurement {
            elapsed,
            budget: self.gauge.budget,
            over_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    fn gauge(budget: Duration) -> (BudgetGauge, ManualClock) {
        let clock = ManualClock::new();
        (BudgetGauge::new(budget, Arc::new(clock.clone())), clock)
    }

    #[test]
    fn work_inside_budget_is_not_flagged() {
        let (gauge, clock) = gauge(Duration::from_millis(8));
        let span = gauge.start();
        clock.advance(Duration::from_millis(3));
        let measurement = span.finish("convert");

        assert_eq!(measurement.elapsed, Duration::from_millis(3));
        assert!(!measurement.over_budget);
    }

    #[test]
    fn overruns_are_reported_not_truncated() {
        let (gauge, clock) = gauge(Duration::from_millis(1));
        let span = gauge.start();
        clock.advance(Duration::from_millis(5));
        let measurement = span.finish("validate");

        // The full elapsed time is preserved alongside the flag.
        assert_eq!(measurement.elapsed, Duration::from_millis(5));
        assert!(measurement.over_budget);
    }

    #[test]
    fn exactly_on_budget_is_within_budget() {
        let (gauge, clock) = gauge(Duration::from_millis(2));
        let span = gauge.start();
        clock.advance(Duration::from_millis(2));
        assert!(!span.finish("validate").over_budget);
    }
}
