//! Time measurement utilities for frame pacing and profiling

use std::time::{Duration, Instant};

/// Simple stopwatch for measuring elapsed wall-clock time
#[derive(Debug, Clone)]
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

    /// Start (or resume) the stopwatch
    pub fn start(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let running = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + running
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

/// Running statistics over paced frames
///
/// Tracks how long the work inside each frame took and how many frames
/// exceeded their budget, so the application can report whether the fixed
/// rate is actually being held.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u64,
    overruns: u64,
    busy_total: Duration,
    worst_busy: Duration,
}

impl FrameStats {
    /// Record one frame's busy time against its budget
    pub fn record(&mut self, busy: Duration, budget: Duration) {
        self.frames += 1;
        self.busy_total += busy;
        if busy > self.worst_busy {
            self.worst_busy = busy;
        }
        if busy > budget {
            self.overruns += 1;
        }
    }

    /// Number of recorded frames
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of frames whose work exceeded the budget
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Average busy time per frame in milliseconds
    pub fn average_busy_millis(&self) -> f32 {
        if self.frames == 0 {
            return 0.0;
        }
        self.busy_total.as_secs_f32() * 1000.0 / self.frames as f32
    }

    /// Longest busy time seen so far
    pub fn worst_busy(&self) -> Duration {
        self.worst_busy
    }
}
