//! Time management utilities

use std::time::{Duration, Instant};

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}

/// Fixed-step accumulator
///
/// Converts variable frame times into a whole number of fixed simulation
/// steps. Leftover time carries into the next frame. At most `max_steps`
/// are produced per frame; excess backlog is dropped so a long stall cannot
/// snowball into ever-longer catch-up frames.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
    total_steps: u64,
}

impl FixedTimestep {
    /// Create an accumulator producing steps of `step` seconds
    pub fn new(step: f32) -> Self {
        debug_assert!(step > 0.0, "fixed timestep must be positive");
        Self {
            step,
            accumulator: 0.0,
            max_steps: 8,
            total_steps: 0,
        }
    }

    /// Set the per-frame step cap
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Length of one step in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total steps handed out since creation
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Feed `frame_time` seconds and return how many fixed steps to run
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.accumulator += frame_time.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_steps && self.accumulator >= self.step {
            log::warn!(
                "Fixed timestep fell behind, dropping {:.3}s of simulation time",
                self.accumulator
            );
            self.accumulator %= self.step;
        }

        self.total_steps += u64::from(steps);
        steps
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_timestep_accumulates_remainder() {
        let mut fixed = FixedTimestep::new(0.016);
        assert_eq!(fixed.advance(0.010), 0);
        assert_eq!(fixed.advance(0.010), 1);
        assert!(fixed.alpha() > 0.0 && fixed.alpha() < 1.0);
        assert_eq!(fixed.total_steps(), 1);
    }

    #[test]
    fn test_fixed_timestep_caps_steps() {
        let mut fixed = FixedTimestep::new(0.016).with_max_steps(4);
        assert_eq!(fixed.advance(1.0), 4);
        assert!(fixed.alpha() < 1.0);
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut fixed = FixedTimestep::new(0.016);
        assert_eq!(fixed.advance(-5.0), 0);
        assert_eq!(fixed.alpha(), 0.0);
    }

    #[test]
    fn test_stopwatch_accumulates() {
        let mut stopwatch = Stopwatch::start_new();
        stopwatch.stop();
        let first = stopwatch.elapsed();
        assert_eq!(stopwatch.elapsed(), first);
    }
}
