//! Frame timing

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// Frame Pacer
// ============================================================================

/// Holds the loop to a fixed frame rate by sleeping off the unused part of
/// each frame's budget.
pub struct FramePacer {
    frame_budget: Duration,
    last_frame: Instant,
}

impl FramePacer {
    /// `fps` below 1 is treated as 1
    pub fn new(fps: u32) -> Self {
        Self {
            frame_budget: Duration::from_secs(1) / fps.max(1),
            last_frame: Instant::now(),
        }
    }

    #[inline]
    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Time left in the budget after `elapsed`, `None` if the frame ran over
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.frame_budget
            .checked_sub(elapsed)
            .filter(|d| !d.is_zero())
    }

    /// Sleep until the current frame's budget is used up.
    /// Returns seconds since the previous call.
    pub fn wait(&mut self) -> f32 {
        if let Some(rest) = self.remaining(self.last_frame.elapsed()) {
            thread::sleep(rest);
        }
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }
}

// ============================================================================
// FPS Counter
// ============================================================================

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        let sample_count = sample_count.max(1);
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            sample_count,
        }
    }

    /// Add one frame's duration in seconds; returns the rolling average FPS
    pub fn record(&mut self, dt: f32) -> f32 {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
        self.average_fps()
    }

    fn avg_dt(&self) -> f32 {
        self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32
    }

    pub fn average_fps(&self) -> f32 {
        let avg_dt = self.avg_dt();
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        self.avg_dt() * 1000.0
    }

    /// Slowest and fastest frame in the window, as FPS
    pub fn min_max_fps(&self) -> (f32, f32) {
        if self.frame_times.is_empty() {
            return (0.0, 0.0);
        }
        let min_dt = self
            .frame_times
            .iter()
            .copied()
            .fold(f32::INFINITY, f32::min);
        let max_dt = self.frame_times.iter().copied().fold(0.0, f32::max);
        let max_fps = if min_dt > 0.0 { 1.0 / min_dt } else { 0.0 };
        let min_fps = if max_dt > 0.0 { 1.0 / max_dt } else { 0.0 };
        (min_fps, max_fps)
    }
}
