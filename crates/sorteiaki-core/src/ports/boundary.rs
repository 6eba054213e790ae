use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::errors::{Error, Result};

pub trait ClockPort {
    /// Milliseconds since the unix epoch.
    fn now_millis(&self) -> Result<i64>;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_millis(&self) -> Result<i64> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Clock(e.to_string()))?;
        i64::try_from(elapsed.as_millis()).map_err(|e| Error::Clock(e.to_string()))
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock pinned to one instant; `sleep` returns immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl ClockPort for FixedClock {
    fn now_millis(&self) -> Result<i64> {
        Ok(self.0)
    }

    fn sleep(&self, _duration: Duration) {}
}
