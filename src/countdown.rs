//! Countdown to a projected completion time.
//!
//! The state machine is driven by ticks and reads time through [`Clock`], so
//! it can run without a live timer. The UI owns the periodic timer.

use std::fmt;

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(target_arch = "wasm32")]
fn wall_clock_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn wall_clock_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        wall_clock_ms()
    }
}

/// Start and projected end of a successful calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub started_at_ms: f64,
    pub finish_at_ms: f64,
}

impl Projection {
    /// Fix the completion time at `now + seconds`.
    pub fn starting_now(clock: &impl Clock, seconds: f64) -> Self {
        let started_at_ms = clock.now_ms();
        Self {
            started_at_ms,
            finish_at_ms: started_at_ms + seconds * 1000.0,
        }
    }
}

/// Whole hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Hms {
    /// Round `seconds` up to the next whole second and split it.
    pub fn from_seconds_ceil(seconds: f64) -> Self {
        let total = seconds.max(0.0).ceil() as u64;
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountdownState {
    Idle,
    Running { finish_at_ms: f64 },
    Completed,
}

/// What to render after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    Idle,
    Remaining(Hms),
    Completed,
}

impl Tick {
    pub fn label(&self) -> String {
        match self {
            Tick::Idle => String::new(),
            Tick::Remaining(hms) => format!("Countdown: {}", hms),
            Tick::Completed => "Countdown: completed!".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Countdown {
    state: CountdownState,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            state: CountdownState::Idle,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running { .. })
    }

    /// Begin counting down to `finish_at_ms`, replacing any previous run.
    pub fn start(&mut self, finish_at_ms: f64) {
        self.state = CountdownState::Running { finish_at_ms };
    }

    pub fn reset(&mut self) {
        self.state = CountdownState::Idle;
    }

    pub fn tick(&mut self, clock: &impl Clock) -> Tick {
        match self.state {
            CountdownState::Idle => Tick::Idle,
            CountdownState::Completed => Tick::Completed,
            CountdownState::Running { finish_at_ms } => {
                let remaining_ms = finish_at_ms - clock.now_ms();
                if remaining_ms <= 0.0 {
                    self.state = CountdownState::Completed;
                    Tick::Completed
                } else {
                    Tick::Remaining(Hms::from_seconds_ceil(remaining_ms / 1000.0))
                }
            }
        }
    }
}
