//! Fixed-timestep frame loop.
//!
//! Session updates run at a fixed 60 Hz from an accumulator; presentation
//! runs once per frame with the leftover fraction of a step.

use std::time::Instant;
use tracing::warn;

/// Fixed update step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time fed to the accumulator. Anything slower is clamped
/// so a stall does not trigger a burst of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

#[derive(Debug)]
pub struct FixedStepLoop {
    previous_time: Instant,
    accumulator: f64,
    total_time: f64,
    frame_count: u64,
    step_count: u64,
}

impl FixedStepLoop {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_time: 0.0,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Measure the wall-clock time since the last call and
    /// [`advance`](Self::advance) by it.
    pub fn tick(&mut self, step_fn: impl FnMut(f64, f64), present_fn: impl FnMut(f64)) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time, step_fn, present_fn);
    }

    /// Run one frame of `frame_time` seconds.
    ///
    /// `step_fn(FIXED_DT, total_time)` runs zero or more times, then
    /// `present_fn(alpha)` runs once with `alpha` in `[0, 1)`.
    pub fn advance(
        &mut self,
        frame_time: f64,
        mut step_fn: impl FnMut(f64, f64),
        mut present_fn: impl FnMut(f64),
    ) {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        while self.accumulator >= FIXED_DT {
            step_fn(FIXED_DT, self.total_time);
            self.total_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.step_count += 1;
        }

        present_fn(self.alpha());
        self.frame_count += 1;
    }

    /// Fraction of a step left in the accumulator.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Simulated seconds so far.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}

impl Default for FixedStepLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step() {
        let mut frame_loop = FixedStepLoop::new();
        let mut steps = 0u32;
        frame_loop.advance(FIXED_DT, |_, _| steps += 1, |_| {});
        assert_eq!(steps, 1);
        assert!(frame_loop.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_partial_step_presents_without_stepping() {
        let mut frame_loop = FixedStepLoop::new();
        let mut steps = 0u32;
        let mut alpha = 0.0;
        frame_loop.advance(0.25 * FIXED_DT, |_, _| steps += 1, |a| alpha = a);
        assert_eq!(steps, 0);
        assert!((alpha - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_long_frame_clamped() {
        let mut frame_loop = FixedStepLoop::new();
        let mut steps = 0u32;
        frame_loop.advance(1.0, |_, _| steps += 1, |_| {});
        let max_steps = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(steps > 0 && steps <= max_steps, "{steps}");
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut frame_loop = FixedStepLoop::new();
        let mut steps = 0u32;
        frame_loop.advance(-1.0, |_, _| steps += 1, |_| {});
        assert_eq!(steps, 0);
        assert_eq!(frame_loop.alpha(), 0.0);
    }

    #[test]
    fn test_total_time_tracks_steps() {
        let mut frame_loop = FixedStepLoop::new();
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];
        for ft in frame_times {
            frame_loop.advance(ft, |_, _| {}, |_| {});
        }
        let expected = frame_loop.step_count() as f64 * FIXED_DT;
        assert!((frame_loop.total_time() - expected).abs() < 1e-10);
        assert_eq!(frame_loop.frame_count(), frame_times.len() as u64);
    }

    #[test]
    fn test_step_receives_running_time() {
        let mut frame_loop = FixedStepLoop::new();
        let mut seen = Vec::new();
        frame_loop.advance(3.0 * FIXED_DT + 1e-9, |_, t| seen.push(t), |_| {});
        assert_eq!(seen.len(), 3);
        assert!((seen[2] - 2.0 * FIXED_DT).abs() < 1e-12);
    }
}
