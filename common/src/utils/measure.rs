//! Measuring the time of operations

use std::time::{Duration, Instant};

/// Logs the elapsed time at info level when dropped.
pub struct MeasureTime(Instant);

impl MeasureTime {
    pub fn new() -> Self {
        Self(Instant::now())
    }
}

impl Default for MeasureTime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MeasureTime {
    fn drop(&mut self) {
        // truncate to milliseconds
        let elapsed = Duration::from_millis(self.0.elapsed().as_millis() as u64);
        log::info!("Processing took {}", humantime::format_duration(elapsed));
    }
}
