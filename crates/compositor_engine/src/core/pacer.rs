//! Fixed-timestep frame pacing
//!
//! Every step advances the simulation by exactly `fixed_dt`, whatever the
//! wall clock did, then sleeps until `fixed_dt` has passed since the step
//! began. A step that overruns its budget is not compensated; the next one
//! simply starts late.

use std::thread;
use std::time::{Duration, Instant};

use crate::foundation::time::FrameStats;
use crate::scene::GeometryProvider;

/// Default step length, 60 Hz
pub const DEFAULT_FIXED_DT: Duration = Duration::from_nanos(16_666_667);

/// Fixed-rate simulation driver with run / pause / single-step control
#[derive(Debug, Clone)]
pub struct FramePacer {
    fixed_dt: Duration,
    paused: bool,
    frame: u64,
    stats: FrameStats,
}

impl FramePacer {
    /// Pacer stepping every `fixed_dt`; a zero duration falls back to 60 Hz
    pub fn new(fixed_dt: Duration) -> Self {
        let fixed_dt = if fixed_dt.is_zero() {
            log::warn!("Zero fixed timestep requested; using 60 Hz");
            DEFAULT_FIXED_DT
        } else {
            fixed_dt
        };
        Self {
            fixed_dt,
            paused: false,
            frame: 0,
            stats: FrameStats::default(),
        }
    }

    /// Pacer stepping every `seconds`
    pub fn from_secs(seconds: f32) -> Self {
        Self::new(Duration::try_from_secs_f32(seconds).unwrap_or(DEFAULT_FIXED_DT))
    }

    /// Step length
    pub fn fixed_dt(&self) -> Duration {
        self.fixed_dt
    }

    /// Steps taken so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Start counting steps from zero again
    pub fn reset_frame_count(&mut self) {
        self.frame = 0;
    }

    /// Busy-time statistics of the steps taken
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Whether `tick` currently does nothing
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Resume continuous stepping
    pub fn run(&mut self) {
        if self.paused {
            log::info!("Pacer running from frame {}", self.frame);
        }
        self.paused = false;
    }

    /// Stop continuous stepping
    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("Pacer paused at frame {}", self.frame);
        }
        self.paused = true;
    }

    /// Pause, then take exactly one step
    pub fn step_once<P: GeometryProvider + ?Sized>(&mut self, provider: &mut P) {
        self.pause();
        self.step(provider);
    }

    /// Take a step unless paused; returns whether one was taken
    pub fn tick<P: GeometryProvider + ?Sized>(&mut self, provider: &mut P) -> bool {
        if self.paused {
            return false;
        }
        self.step(provider);
        true
    }

    /// Advance `provider` by the fixed delta and wait out the rest of the period
    pub fn step<P: GeometryProvider + ?Sized>(&mut self, provider: &mut P) {
        let started = Instant::now();
        provider.update(self.fixed_dt.as_secs_f32());

        let busy = started.elapsed();
        self.stats.record(busy, self.fixed_dt);
        if busy > self.fixed_dt {
            log::debug!(
                "Step {} took {:.2} ms, over the {:.2} ms budget",
                self.frame,
                busy.as_secs_f32() * 1000.0,
                self.fixed_dt.as_secs_f32() * 1000.0
            );
        }

        let deadline = started + self.fixed_dt;
        if let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            thread::sleep(remaining);
        }
        self.frame += 1;
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RenderableInstance;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct CountingProvider {
        updates: u32,
        last_dt: f32,
        instances: Vec<RenderableInstance>,
    }

    impl GeometryProvider for CountingProvider {
        fn update(&mut self, dt: f32) {
            self.updates += 1;
            self.last_dt = dt;
        }

        fn current_instances(&self) -> &[RenderableInstance] {
            &self.instances
        }
    }

    #[test]
    fn test_step_uses_fixed_delta_and_waits() {
        let mut pacer = FramePacer::new(Duration::from_millis(5));
        let mut provider = CountingProvider::default();

        let started = Instant::now();
        pacer.step(&mut provider);
        pacer.step(&mut provider);
        assert!(started.elapsed() >= Duration::from_millis(10));

        assert_eq!(provider.updates, 2);
        assert_relative_eq!(provider.last_dt, 0.005, epsilon = 1e-6);
        assert_eq!(pacer.frame(), 2);
        assert_eq!(pacer.stats().frames(), 2);
    }

    #[test]
    fn test_pause_and_single_step() {
        let mut pacer = FramePacer::new(Duration::from_millis(1));
        let mut provider = CountingProvider::default();

        assert!(pacer.tick(&mut provider));
        pacer.pause();
        assert!(!pacer.tick(&mut provider));
        assert_eq!(provider.updates, 1);

        pacer.step_once(&mut provider);
        assert!(pacer.is_paused());
        assert_eq!(provider.updates, 2);
        assert_eq!(pacer.frame(), 2);

        pacer.run();
        assert!(pacer.tick(&mut provider));
        assert_eq!(provider.updates, 3);
    }

    #[test]
    fn test_zero_timestep_falls_back() {
        assert_eq!(FramePacer::new(Duration::ZERO).fixed_dt(), DEFAULT_FIXED_DT);
        assert_eq!(FramePacer::from_secs(-1.0).fixed_dt(), DEFAULT_FIXED_DT);
        assert_eq!(FramePacer::default().fixed_dt(), DEFAULT_FIXED_DT);
    }
}
