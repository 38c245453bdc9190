//! Budget-aware debounced scheduling.
//!
//! [`BudgetedScheduler`] sits between an interactive caller and the
//! conversion engine. Submissions arriving within one coalescing window
//! collapse to a single pending unit carrying the latest input; the unit
//! executes when the window closes, on [`BudgetedScheduler::flush`], or
//! never if [`BudgetedScheduler::cancel`] discards it first.
//!
//! # State machine
//!
//! ```text
//! Idle --[submit, deadline armed]--> Pending
//! Pending --[submit within window]--> Pending (payload replaced)
//! Pending --[deadline reached or flush]--> Executing --> Idle
//! Pending --[cancel]--> Idle (nothing runs)
//! ```
//!
//! Execution is validate-then-convert, each half measured against its own
//! budget (validation is the stricter one). Overruns are warned about and
//! counted, never enforced: no unit of work is preempted once started.
//! The clock is injected, so tests drive the window with virtual time;
//! [`BudgetedScheduler::run`] is the tokio-timer driver for production
//! callers.

mod budget;

pub use budget::{BudgetGauge, BudgetSpan, Measurement};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::convert::{ConversionEngine, ConversionResult};
use crate::coord::Format;
use crate::detect::detect;
use crate::time::Clock;
use crate::validate::{self, ValidationResult};

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Coalescing window; defaults to one display frame at 60 Hz.
    pub debounce_window: Duration,
    /// Budget for the validation half of a unit.
    pub validate_budget: Duration,
    /// Budget for the conversion half of a unit.
    pub convert_budget: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_millis(16),
            validate_budget: Duration::from_millis(1),
            convert_budget: Duration::from_millis(8),
        }
    }
}

/// Scheduler lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing pending.
    Idle,
    /// A unit is armed and waiting for its deadline.
    Pending,
    /// A unit is running; only observable from within execution.
    Executing,
}

/// Counters for scheduler activity.
#[derive(Debug, Default)]
pub struct SchedulerStats {
    submissions: AtomicU64,
    coalesced: AtomicU64,
    executions: AtomicU64,
    cancellations: AtomicU64,
    budget_overruns: AtomicU64,
}

impl SchedulerStats {
    /// Snapshot for display or assertions.
    pub fn snapshot(&self) -> SchedulerStatsSnapshot {
        SchedulerStatsSnapshot {
            submissions: self.submissions.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            executions: self.executions.load(Ordering::Relaxed),
            cancellations: self.cancellations.load(Ordering::Relaxed),
            budget_overruns: self.budget_overruns.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of [`SchedulerStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStatsSnapshot {
    pub submissions: u64,
    pub coalesced: u64,
    pub executions: u64,
    pub cancellations: u64,
    pub budget_overruns: u64,
}

/// Outcome of one executed unit of work.
#[derive(Debug, Clone)]
pub struct ScheduledOutcome {
    /// The input that was executed (the latest of a coalesced burst).
    pub raw: String,
    /// Format used; `None` when detection found only empty input.
    pub format: Option<Format>,
    /// Validation verdict.
    pub validation: ValidationResult,
    /// Time spent validating, against the validation budget.
    pub validation_time: Measurement,
    /// Conversion result; absent when validation already failed.
    pub conversion: Option<ConversionResult>,
    /// Time spent converting, when a conversion ran.
    pub conversion_time: Option<Measurement>,
}

/// Requests accepted by the [`BudgetedScheduler::run`] driver.
#[derive(Debug, Clone)]
pub enum SchedulerRequest {
    /// New input; `None` format means auto-detect at execution time.
    Input { raw: String, format: Option<Format> },
    /// Execute any pending unit immediately.
    Flush,
    /// Discard any pending unit without executing it.
    Cancel,
}

/// A pending, not-yet-started unit of work.
#[derive(Debug, Clone)]
struct PendingUnit {
    raw: String,
    format: Option<Format>,
    /// Fixed when the window opened; later submissions do not push it out.
    deadline: Instant,
}

/// Debounce and budget discipline around the conversion engine.
pub struct BudgetedScheduler {
    engine: Arc<ConversionEngine>,
    config: SchedulerConfig,
    clock: Arc<dyn Clock>,
    state: SchedulerState,
    pending: Option<PendingUnit>,
    validate_gauge: BudgetGauge,
    convert_gauge: BudgetGauge,
    stats: Arc<SchedulerStats>,
}

impl BudgetedScheduler {
    /// Creates a scheduler over `engine`.
    pub fn new(engine: Arc<ConversionEngine>, config: SchedulerConfig, clock: Arc<dyn Clock>) -> Self {
        let validate_gauge = BudgetGauge::new(config.validate_budget, Arc::clone(&clock));
        let convert_gauge = BudgetGauge::new(config.convert_budget, Arc::clone(&clock));
        Self {
            engine,
            config,
            clock,
            state: SchedulerState::Idle,
            pending: None,
            validate_gauge,
            convert_gauge,
            stats: Arc::new(SchedulerStats::default()),
        }
    }

    /// Shared handle to the activity counters.
    pub fn stats(&self) -> Arc<SchedulerStats> {
        Arc::clone(&self.stats)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Submits input, coalescing with any pending unit.
    ///
    /// The first submission of a burst opens the window and fixes the
    /// deadline; later submissions replace the payload only.
    pub fn submit(&mut self, raw: impl Into<String>, format: Option<Format>) {
        let raw = raw.into();
        self.stats.submissions.fetch_add(1, Ordering::Relaxed);

        match &mut self.pending {
            Some(unit) => {
                trace!(raw = %raw, "coalescing with pending input");
                self.stats.coalesced.fetch_add(1, Ordering::Relaxed);
                unit.raw = raw;
                unit.format = format;
            }
            None => {
                let deadline = self.clock.now() + self.config.debounce_window;
                self.pending = Some(PendingUnit {
                    raw,
                    format,
                    deadline,
                });
                self.state = SchedulerState::Pending;
            }
        }
    }

    /// True when a pending unit's deadline has passed.
    pub fn due(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|unit| self.clock.now() >= unit.deadline)
    }

    /// Executes the pending unit if its deadline has passed.
    pub async fn poll(&mut self) -> Option<ScheduledOutcome> {
        if !self.due() {
            return None;
        }
        self.execute().await
    }

    /// Executes any pending unit immediately, ahead of its deadline.
    pub async fn flush(&mut self) -> Option<ScheduledOutcome> {
        self.execute().await
    }

    /// Discards the pending unit without executing it.
    ///
    /// Only meaningful in `Pending`; returns whether a unit was discarded.
    pub fn cancel(&mut self) -> bool {
        if self.state != SchedulerState::Pending {
            return false;
        }
        self.pending = None;
        self.state = SchedulerState::Idle;
        self.stats.cancellations.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Runs the pending unit: validate, then convert if validation passed.
    async fn execute(&mut self) -> Option<ScheduledOutcome> {
        let unit = self.pending.take()?;
        self.state = SchedulerState::Executing;
        self.stats.executions.fetch_add(1, Ordering::Relaxed);

        let format = unit.format.or_else(|| detect(&unit.raw));

        let span = self.validate_gauge.start();
        let validation = match format {
            Some(format) => validate::validate(&unit.raw, format),
            None => ValidationResult::invalid(
                "input is empty",
                vec!["enter a coordinate".to_string()],
            ),
        };
        let validation_time = span.finish("validate");
        self.record_overrun(&validation_time);

        let (conversion, conversion_time) = match (format, validation.valid) {
            (Some(format), true) => {
                let span = self.convert_gauge.start();
                let result = self.engine.convert(&unit.raw, format).await;
                let measurement = span.finish("convert");
                self.record_overrun(&measurement);
                (Some(result), Some(measurement))
            }
            _ => (None, None),
        };

        self.state = SchedulerState::Idle;
        debug!(raw = %unit.raw, ?format, valid = validation.valid, "executed scheduled unit");

        Some(ScheduledOutcome {
            raw: unit.raw,
            format,
            validation,
            validation_time,
            conversion,
            conversion_time,
        })
    }

    fn record_overrun(&self, measurement: &Measurement) {
        if measurement.over_budget {
            self.stats.budget_overruns.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Tokio driver: accepts requests, fires deadlines, emits outcomes.
    ///
    /// Intended for production use with a [`crate::time::SystemClock`];
    /// tests drive the state machine directly with a manual clock.
    pub async fn run(
        mut self,
        mut requests: mpsc::Receiver<SchedulerRequest>,
        outcomes: mpsc::Sender<ScheduledOutcome>,
        shutdown: CancellationToken,
    ) {
        loop {
            let deadline = self.pending.as_ref().map(|unit| unit.deadline);

            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("scheduler shutting down, discarding pending work");
                    self.pending = None;
                    break;
                }
                request = requests.recv() => match request {
                    Some(SchedulerRequest::Input { raw, format }) => self.submit(raw, format),
                    Some(SchedulerRequest::Flush) => {
                        if let Some(outcome) = self.flush().await {
                            if outcomes.send(outcome).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(SchedulerRequest::Cancel) => {
                        self.cancel();
                    }
                    None => break,
                },
                _ = sleep_until_std(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(outcome) = self.poll().await {
                        if outcomes.send(outcome).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }
}

async fn sleep_until_std(deadline: Instant) {
    tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, ConversionCache};
    use crate::time::ManualClock;

    fn scheduler() -> (BudgetedScheduler, ManualClock) {
        let clock = ManualClock::new();
        let cache = ConversionCache::new(CacheConfig::default(), Arc::new(clock.clone()));
        let engine = Arc::new(ConversionEngine::new(cache, None));
        let scheduler = BudgetedScheduler::new(
            engine,
            SchedulerConfig::default(),
            Arc::new(clock.clone()),
        );
        (scheduler, clock)
    }

    #[tokio::test]
    async fn burst_of_keystrokes_executes_once_with_the_final_value() {
        let (mut scheduler, clock) = scheduler();

        for text in ["4", "40", "40.7", "40.71,", "40.7128, -74.0060"] {
            scheduler.submit(text, Some(Format::LatLong));
            clock.advance(Duration::from_millis(1));
        }
        assert_eq!(scheduler.state(), SchedulerState::Pending);
        assert!(scheduler.poll().await.is_none());

        clock.advance(Duration::from_millis(16));
        let outcome = scheduler.poll().await.expect("deadline has passed");

        assert_eq!(outcome.raw, "40.7128, -74.0060");
        assert!(outcome.validation.valid);
        assert!(outcome.conversion.unwrap().is_ok());

        let stats = scheduler.stats().snapshot();
        assert_eq!(stats.submissions, 5);
        assert_eq!(stats.coalesced, 4);
        assert_eq!(stats.executions, 1);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[tokio::test]
    async fn later_submissions_do_not_extend_the_window() {
        let (mut scheduler, clock) = scheduler();

        scheduler.submit("40, -74", Some(Format::LatLong));
        clock.advance(Duration::from_millis(10));
        scheduler.submit("41, -74", Some(Format::LatLong));

        // 16ms after the first submission the unit is due, regardless of
        // the second submission 10ms in.
        clock.advance(Duration::from_millis(6));
        let outcome = scheduler.poll().await.expect("window closed");
        assert_eq!(outcome.raw, "41, -74");
    }

    #[tokio::test]
    async fn flush_executes_ahead_of_the_deadline() {
        let (mut scheduler, _clock) = scheduler();

        scheduler.submit("18TWL8562811322", Some(Format::Mgrs));
        let outcome = scheduler.flush().await.expect("pending unit");
        assert!(outcome.validation.valid);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[tokio::test]
    async fn cancel_discards_pending_work() {
        let (mut scheduler, clock) = scheduler();

        scheduler.submit("40, -74", Some(Format::LatLong));
        assert!(scheduler.cancel());
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        clock.advance(Duration::from_millis(20));
        assert!(scheduler.poll().await.is_none());
        assert_eq!(scheduler.stats().snapshot().executions, 0);
    }

    #[tokio::test]
    async fn cancel_is_only_valid_from_pending() {
        let (mut scheduler, _clock) = scheduler();
        assert!(!scheduler.cancel());
        assert_eq!(scheduler.stats().snapshot().cancellations, 0);
    }

    #[tokio::test]
    async fn format_is_detected_at_execution_time() {
        let (mut scheduler, _clock) = scheduler();

        scheduler.submit("18T 585628 4511322", None);
        let outcome = scheduler.flush().await.unwrap();
        assert_eq!(outcome.format, Some(Format::Utm));
        assert!(outcome.validation.valid);
    }

    #[tokio::test]
    async fn invalid_input_skips_conversion() {
        let (mut scheduler, _clock) = scheduler();

        scheduler.submit("91.0, 0.0", Some(Format::LatLong));
        let outcome = scheduler.flush().await.unwrap();

        assert!(!outcome.validation.valid);
        assert!(outcome.conversion.is_none());
        assert!(outcome.conversion_time.is_none());
        assert!(!outcome.validation.suggestions.is_empty());
    }

    #[tokio::test]
    async fn empty_input_yields_an_invalid_outcome() {
        let (mut scheduler, _clock) = scheduler();

        scheduler.submit("   ", None);
        let outcome = scheduler.flush().await.unwrap();
        assert_eq!(outcome.format, None);
        assert!(!outcome.validation.valid);
        assert!(outcome.conversion.is_none());
    }

    #[tokio::test]
    async fn a_failed_conversion_returns_the_scheduler_to_idle() {
        let (mut scheduler, _clock) = scheduler();

        // Valid shape, but words have no geocoder wired in this test.
        scheduler.submit("filled.count.soap", Some(Format::Words));
        let outcome = scheduler.flush().await.unwrap();

        assert!(outcome.validation.valid);
        assert!(outcome.conversion.unwrap().is_err());
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }
}
