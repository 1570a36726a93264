use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the simulation start time, in seconds since the Unix epoch.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Reads the wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Always reports the same instant. Used for reproducible runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}
