use std::time::Duration;

/// Interval between counter ticks, roughly one animation frame.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Animation length used when a stat does not name one.
pub const DEFAULT_DURATION_MS: i64 = 2000;

/// Immutable description of one animated counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSpec {
    target: u64,
    duration_ms: u64,
    suffix: String,
}

impl CounterSpec {
    /// Builds a spec from raw page values.
    ///
    /// A negative `target` is clamped to 0. A non-positive `duration_ms`
    /// makes the counter jump straight to its target on activation.
    pub fn new(target: i64, duration_ms: i64, suffix: impl Into<String>) -> Self {
        Self {
            target: u64::try_from(target).unwrap_or(0),
            duration_ms: u64::try_from(duration_ms).unwrap_or(0),
            suffix: suffix.into(),
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn completes_immediately(&self) -> bool {
        self.duration_ms == 0
    }

    /// Amount added to the running total on every tick:
    /// `target / (duration / tick)`.
    pub fn increment_per_tick(&self, tick_interval: Duration) -> f64 {
        if self.completes_immediately() {
            return self.target as f64;
        }
        let tick_interval = if tick_interval.is_zero() {
            DEFAULT_TICK_INTERVAL
        } else {
            tick_interval
        };
        let tick_ms = tick_interval.as_secs_f64() * 1000.0;
        let ticks = self.duration_ms as f64 / tick_ms;
        self.target as f64 / ticks
    }
}

/// Snapshot of a counter's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterState {
    pub current_value: u64,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    Idle,
    Running,
    Complete,
}

/// Result of asking an idle counter to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The counter is running and needs a repeating timer.
    Started,
    /// The counter reached its target without ticking; no timer is needed.
    CompletedImmediately,
    /// The counter had already been activated.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// This tick reached the target; the timer must be released.
    Completed,
    /// The counter is not running; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Running { total: f64 },
    Complete,
}

/// Counts from 0 up to a target over a fixed duration, then stops for good.
///
/// Lifecycle is `Idle -> Running -> Complete` (or `Idle -> Complete` when the
/// duration is non-positive). There is no way back to `Idle`.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    spec: CounterSpec,
    tick_interval: Duration,
    increment: f64,
    value: u64,
    ticks: u32,
    phase: Phase,
}

impl Counter {
    /// A zero `tick_interval` falls back to [`DEFAULT_TICK_INTERVAL`].
    pub fn new(spec: CounterSpec, tick_interval: Duration) -> Self {
        let tick_interval = if tick_interval.is_zero() {
            DEFAULT_TICK_INTERVAL
        } else {
            tick_interval
        };
        let increment = spec.increment_per_tick(tick_interval);
        Self {
            spec,
            tick_interval,
            increment,
            value: 0,
            ticks: 0,
            phase: Phase::Idle,
        }
    }

    pub fn spec(&self) -> &CounterSpec {
        &self.spec
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn ticks_elapsed(&self) -> u32 {
        self.ticks
    }

    pub fn phase(&self) -> CounterPhase {
        match self.phase {
            Phase::Idle => CounterPhase::Idle,
            Phase::Running { .. } => CounterPhase::Running,
            Phase::Complete => CounterPhase::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn state(&self) -> CounterState {
        CounterState {
            current_value: self.value,
            is_complete: self.is_complete(),
        }
    }

    pub fn activate(&mut self) -> Activation {
        if self.phase != Phase::Idle {
            return Activation::Ignored;
        }
        if self.spec.completes_immediately() {
            self.finish();
            return Activation::CompletedImmediately;
        }
        self.phase = Phase::Running { total: 0.0 };
        Activation::Started
    }

    pub fn tick(&mut self) -> TickOutcome {
        let Phase::Running { total } = self.phase else {
            return TickOutcome::Ignored;
        };
        self.ticks = self.ticks.saturating_add(1);
        let total = total + self.increment;
        if total >= self.spec.target as f64 {
            self.finish();
            return TickOutcome::Completed;
        }
        let floored = (total.floor() as u64).min(self.spec.target);
        self.value = self.value.max(floored);
        self.phase = Phase::Running { total };
        TickOutcome::Advanced
    }

    /// Rendered text, `"{value}{suffix}"`.
    pub fn display(&self) -> String {
        format!("{}{}", self.value, self.spec.suffix)
    }

    fn finish(&mut self) {
        self.value = self.spec.target;
        self.phase = Phase::Complete;
    }
}
