use std::time::{Duration, Instant};

use itertools::Itertools;
use rustc_hash::FxHashMap;

/// Number of recent laps averaged in the debug output
const WINDOW: usize = 5;

/// Times named sections of a frame. Each lap runs from the previous stamp
pub struct StopWatch {
    start: Instant,
    laps: FxHashMap<String, Vec<Duration>>,
}

impl Default for StopWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl StopWatch {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            laps: Default::default(),
        }
    }

    pub fn reset(&mut self) {
        self.start = Instant::now();
    }

    /// Record the time since the last stamp under `name`
    pub fn stamp_and_reset(&mut self, name: &str) {
        let now = Instant::now();
        self.record(name, now.duration_since(self.start));
        self.start = now;
    }

    pub fn record(&mut self, name: &str, duration: Duration) {
        let laps = self.laps.entry(name.to_string()).or_default();
        laps.push(duration);
        if laps.len() > WINDOW {
            laps.remove(0);
        }
    }

    /// Rolling average of a section
    pub fn average(&self, name: &str) -> Option<Duration> {
        let laps = self.laps.get(name).filter(|l| !l.is_empty())?;
        Some(laps.iter().sum::<Duration>() / laps.len() as u32)
    }

    /// One line per section, sorted by name
    pub fn get_debug_strings(&self) -> Vec<String> {
        self.laps
            .keys()
            .sorted()
            .filter_map(|name| Some(format!("{name}: {:?}", self.average(name)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::StopWatch;

    #[test]
    fn test_average_over_recent_laps() {
        let mut stopwatch = StopWatch::new();
        (1..=7).for_each(|ms| stopwatch.record("update", Duration::from_millis(ms)));

        // Only 3..=7 are kept
        assert_eq!(stopwatch.average("update"), Some(Duration::from_millis(5)));
        assert_eq!(stopwatch.average("render"), None);
    }

    #[test]
    fn test_debug_strings_sorted() {
        let mut stopwatch = StopWatch::new();
        stopwatch.record("update", Duration::from_millis(2));
        stopwatch.record("render", Duration::from_millis(1));

        assert_eq!(
            stopwatch.get_debug_strings(),
            ["render: 1ms", "update: 2ms"]
        );
    }
}
